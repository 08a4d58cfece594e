pub mod anim;
pub mod capture;
pub mod demo;
pub mod model;
pub mod store;
pub mod topo;
pub mod viz;
pub mod world;

#[cfg(test)]
mod test;

mod util;

mod animator;
mod demo;
mod store;
mod world;

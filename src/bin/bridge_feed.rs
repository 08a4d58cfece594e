//! 桥接消息回放
//!
//! 读取一个 JSON-lines 文件（每行一条桥接线缆消息），逐条喂给
//! 引擎并穿插动画 tick，结束时输出渲染快照 JSON。

use clap::Parser;
use netviz_rs::world::VizWorld;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Parser)]
#[command(name = "bridge_feed", about = "桥接消息回放：JSONL 线缆消息 -> 渲染快照")]
struct Args {
    /// 输入文件，每行一条桥接消息
    input: PathBuf,
    /// 每条消息之间推进的动画时钟（毫秒）
    #[arg(long, default_value_t = 32)]
    tick_ms: u64,
    /// 快照输出文件；缺省写到 stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    let contents = fs::read_to_string(&args.input).expect("read input file");

    let mut world = VizWorld::default();
    let mut anim_now = 0.0;
    world.tick(anim_now);

    for (lineno, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // 坏行不中断回放，降级为告警。
        if let Err(err) = world.on_bridge_raw(line) {
            warn!(lineno = lineno + 1, %err, "跳过无法解码的桥接消息");
        }
        anim_now += args.tick_ms as f64;
        world.tick(anim_now);
    }

    let json = serde_json::to_string_pretty(world.snapshot()).expect("serialize snapshot");
    match args.out {
        Some(path) => fs::write(&path, json).expect("write snapshot file"),
        None => println!("{json}"),
    }
}

//! 合成流量回放
//!
//! 用确定性的合成流量驱动完整管线，结束时输出渲染快照 JSON。

use clap::Parser;
use netviz_rs::demo::DemoTraffic;
use netviz_rs::store::DEFAULT_MAX_REQUESTS;
use netviz_rs::world::VizWorld;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "replay", about = "合成流量回放：确定性地驱动捕获/动画管线并输出快照")]
struct Args {
    /// 生成多少条合成请求
    #[arg(long, default_value_t = 40)]
    requests: u64,
    /// 随机种子（相同种子输出相同）
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// 两条请求之间推进多少毫秒动画时钟
    #[arg(long, default_value_t = 48)]
    gap_ms: u64,
    /// 动画 tick 间隔（毫秒）
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
    /// 请求存储上限
    #[arg(long, default_value_t = DEFAULT_MAX_REQUESTS)]
    cap: usize,
    /// 只看某个主机名
    #[arg(long)]
    filter: Option<String>,
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

    let mut world = VizWorld::with_cap(args.cap);
    let mut traffic = DemoTraffic::new(args.seed);

    // 合成的 epoch 时钟；动画时钟与其同步推进。
    let mut now_ms: u64 = 1_700_000_000_000;
    world.tick(0.0);

    let tick_ms = args.tick_ms.max(1);
    let mut anim_now = 0.0;
    for _ in 0..args.requests {
        let ev = traffic.generate(now_ms);
        world.on_intercepted(ev.meta);
        if let Some(entry) = ev.entry {
            world.on_timing_entry(&entry, now_ms);
        }

        let mut advanced = 0;
        while advanced < args.gap_ms {
            advanced += tick_ms;
            anim_now += tick_ms as f64;
            world.tick(anim_now);
        }
        now_ms += args.gap_ms;
    }

    if let Some(filter) = args.filter {
        world.set_filter(Some(filter));
    }

    let json = serde_json::to_string_pretty(world.snapshot()).expect("serialize snapshot");
    match args.out {
        Some(path) => fs::write(&path, json).expect("write snapshot file"),
        None => println!("{json}"),
    }
}

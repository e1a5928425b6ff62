//! 属性动画展示 - Host
//!
//! 默认打开窗口；`--headless` 时按固定步长运行并输出动画事件。

use clap::Parser;
use propanim_host::{AppConfig, AppState, Cli, logging, run_headless, window};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = AppConfig::load(&cli.config);
    cli.apply(&mut config);

    if cli.headless {
        let report = run_headless(config, &cli.taps, cli.frames, cli.dt);
        for (frame, event) in &report.events {
            println!("{frame:>5} {event:?}");
        }
        println!(
            "frames={} particles_left={} star={:?}",
            report.frames, report.particles_left, report.star
        );
        return Ok(());
    }

    info!(
        width = config.window.width,
        height = config.window.height,
        seed = ?config.shower.seed,
        "启动窗口"
    );
    window::run(AppState::new(config))
}

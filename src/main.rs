use std::{env, fs, path::PathBuf};

use adreport::{
    acquire,
    advice::AdviceConfig,
    economics::UnitEconomics,
    export,
    report::{self, DimensionSummary, Outcome},
};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Optional YAML config carrying the seller's cost structure and the ROAS
/// advice boundaries. Both sections fall back to their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    economics: UnitEconomics,
    advice: AdviceConfig,
}

struct Args {
    /// Report file, or a directory to scan for the newest report.
    target: PathBuf,
    config: Option<PathBuf>,
    /// Where to export the placement summary, if requested.
    export: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut target = None;
    let mut config = None;
    let mut export = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config = Some(PathBuf::from(args.next().context("--config needs a path")?))
            }
            "--export" => {
                export = Some(PathBuf::from(args.next().context("--export needs a path")?))
            }
            other => target = Some(PathBuf::from(other)),
        }
    }
    Ok(Args {
        target: target.unwrap_or_else(|| PathBuf::from(".")),
        config,
        export,
    })
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = parse_args()?;

    // ─── 2) load config ──────────────────────────────────────────────
    let config: Config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_yaml::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => Config::default(),
    };
    config.advice.validate()?;
    info!(
        net_unit_margin = config.economics.net_unit_margin(),
        "unit economics loaded"
    );

    // ─── 3) resolve the report file ──────────────────────────────────
    let path = if args.target.is_dir() {
        match acquire::latest_report(&args.target)? {
            Some(path) => path,
            None => bail!(
                "no 광고일괄보고서*.csv/xlsx found in {}",
                args.target.display()
            ),
        }
    } else {
        args.target.clone()
    };
    info!("analyzing {}", path.display());

    // ─── 4) run the pipeline ─────────────────────────────────────────
    let result = report::analyze_file(&path, &config.economics)?;
    println!(
        "파일: {} ({}행)  개당 마진: {:.0}원",
        path.display(),
        result.raw_rows,
        config.economics.net_unit_margin()
    );

    let analysis = match result.outcome {
        Outcome::Analyzed {
            quantity_column,
            analysis,
        } => {
            println!("판매수량 기준 컬럼: {quantity_column}");
            analysis
        }
        Outcome::InsufficientColumns(err) => {
            warn!(%err, "rollups skipped");
            println!("분석에 필요한 컬럼이 부족합니다: {err}");
            println!("원본 데이터 {}행은 확인 가능합니다.", result.raw_rows);
            return Ok(());
        }
    };

    // ─── 5) render rollups ───────────────────────────────────────────
    print_dimension("광고 노출 지면", &analysis.placement, Some(&config.advice));
    if let Some(product) = &analysis.product {
        print_dimension("광고집행 상품명", product, None);
    }
    if let Some(keyword) = &analysis.keyword {
        print_dimension("키워드", keyword, None);
    }

    if let Some(out) = &args.export {
        export::write_summary_csv(out, "광고 노출 지면", &analysis.placement)?;
        println!("요약 저장: {}", out.display());
    }

    Ok(())
}

fn print_dimension(label: &str, summary: &DimensionSummary, advice: Option<&AdviceConfig>) {
    println!("\n== {label} ==");
    for group in summary.groups.iter().chain([&summary.total]) {
        let verdict = advice
            .map(|cfg| format!("  [{}]", cfg.bucket(group.roas)))
            .unwrap_or_default();
        println!(
            "{:<20} 노출 {:>10.0}  클릭 {:>7.0}  광고비 {:>10.0}  판매 {:>5.0}  \
             ROAS {:>6.2}  CTR {:>6.4}  CVR {:>5.2}  CPC {:>6.0}  순익 {:>10.0}{}",
            group.key,
            group.impressions,
            group.clicks,
            group.spend,
            group.quantity,
            group.roas,
            group.ctr,
            group.cvr,
            group.cpc,
            group.net_profit,
            verdict
        );
    }

    if !summary.top_performers.is_empty() {
        println!("-- 판매 발생 상위 --");
        for group in &summary.top_performers {
            println!(
                "{:<20} 판매 {:>5.0}  광고비 {:>10.0}",
                group.key, group.quantity, group.spend
            );
        }
    }
    if !summary.spend_sinks.is_empty() {
        println!("-- 판매 0건, 광고비 소진 --");
        for group in &summary.spend_sinks {
            println!(
                "{:<20} 광고비 {:>10.0}  클릭 {:>7.0}",
                group.key, group.spend, group.clicks
            );
        }
    }
}

use std::{env, path::PathBuf, time::Duration};

use adreport::{export, suggest::SuggestClient};
use anyhow::{bail, Result};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let mut args = env::args().skip(1);
    let Some(keyword) = args.next() else {
        bail!("usage: suggest <keyword> [output.csv]");
    };
    let output = args.next().map(PathBuf::from);

    let client = SuggestClient::new(Duration::from_secs(5))?;
    let terms = client.suggestions(&keyword).await;
    if terms.is_empty() {
        println!("연관 키워드 없음: {keyword}");
        return Ok(());
    }

    for term in &terms {
        println!("{term}");
    }
    if let Some(path) = output {
        export::write_keyword_csv(&path, &terms)?;
        println!("저장 완료: {}", path.display());
    }
    Ok(())
}

use resume_extract::core::{parser, reader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RESUME_EXTRACT_LOG")
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: resume-extract <path-to-resume.txt|pdf|docx>");
        std::process::exit(1);
    }

    let text = match reader::read_document(&args[1]).await {
        Ok(text) => text,
        Err(err) => {
            println!("{err}");
            std::process::exit(err.exit_code());
        }
    };

    let (resume, report) = parser::parse_resume(&text);
    tracing::info!(
        sections = report.sections_found.len(),
        missing = report.sections_missing.len(),
        tokens = report.token_count,
        "parsed resume"
    );

    println!("{}", resume.to_json_pretty()?);
    Ok(())
}

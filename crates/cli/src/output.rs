use crate::error::CliError;
use engine_runtime::report::ApplyReport;

fn render(report: &ApplyReport, json: bool) -> Result<String, CliError> {
    if json {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(report.render_text())
    }
}

pub async fn write_report(report: &ApplyReport, json: bool, path: &str) -> Result<(), CliError> {
    let rendered = render(report, json)?;
    tokio::fs::write(path, rendered).await?;
    Ok(())
}

pub fn print_report(report: &ApplyReport, json: bool) -> Result<(), CliError> {
    let rendered = render(report, json)?;
    println!("{rendered}");
    Ok(())
}

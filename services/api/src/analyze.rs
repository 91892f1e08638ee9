use crate::infra::analysis_service;
use clap::Args;
use deal_analyzer::config::AppConfig;
use deal_analyzer::error::AppError;
use deal_analyzer::service::AnalyzeRequest;
use deal_analyzer::{telemetry, DealAnalysis, DealAnalysisService};
use std::fmt::Write as _;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Purchase price
    #[arg(long)]
    pub(crate) price: f64,
    /// After-repair value
    #[arg(long)]
    pub(crate) arv: Option<f64>,
    /// Monthly rent
    #[arg(long)]
    pub(crate) rent: Option<f64>,
    /// Estimated repair budget
    #[arg(long)]
    pub(crate) repairs: Option<f64>,
    /// Property address, used only in the narrative
    #[arg(long)]
    pub(crate) address: Option<String>,
    /// Skip the language model and use the static narrative
    #[arg(long)]
    pub(crate) offline: bool,
    /// Print the HTTP response body instead of a readable report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_analysis(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        price,
        arv,
        rent,
        repairs,
        address,
        offline,
        json,
    } = args;

    let service = if offline {
        DealAnalysisService::default()
    } else {
        let config = AppConfig::load()?;
        telemetry::init(&config.telemetry)?;
        analysis_service(&config.narrative)?
    };

    let request = AnalyzeRequest {
        address,
        price: Some(price),
        arv,
        rent,
        repairs,
    };
    let analysis = service.analyze_request(request).await?;

    if json {
        println!("{}", render_json(&analysis)?);
    } else {
        print!("{}", render_analysis(&analysis));
    }

    Ok(())
}

pub(crate) fn render_json(analysis: &DealAnalysis) -> Result<String, AppError> {
    serde_json::to_string_pretty(analysis).map_err(|err| AppError::Io(std::io::Error::other(err)))
}

pub(crate) fn render_analysis(analysis: &DealAnalysis) -> String {
    let mut out = String::new();
    writeln!(&mut out, "Deal score: {}/100 ({})", analysis.score, analysis.verdict)
        .expect("write score");
    writeln!(&mut out, "{}", analysis.summary).expect("write summary");

    if analysis.breakdown.is_empty() {
        out.push_str("\nBreakdown: add ARV and repairs or rent for metrics\n");
    } else {
        out.push_str("\nBreakdown\n");
        for metric in &analysis.breakdown {
            writeln!(
                &mut out,
                "- {}: {} [{}]",
                metric.label,
                metric.value,
                metric.status.label()
            )
            .expect("write metric");
        }
    }

    out.push_str("\nRisks\n");
    for risk in &analysis.risks {
        writeln!(&mut out, "- {risk}").expect("write risk");
    }

    out.push_str("\nOpportunities\n");
    for opportunity in &analysis.opportunities {
        writeln!(&mut out, "- {opportunity}").expect("write opportunity");
    }

    out
}

//! Packetflow CLI
//!
//! Demo driver for the compliance review flow: builds the reference progress
//! page in memory, runs the staged timeline against it, and reports what
//! happened. Point it at a real finalize endpoint with `--endpoint`, or run
//! fully offline against a canned packet.

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use packetflow_core::finalize::{
    FinalizeOutcome, FinalizeTransport, HttpFinalizeTransport, PacketLocations,
};
use packetflow_core::flow::{FlowConfig, FlowController, FlowSummary, TimelineEntry};
use packetflow_core::ui::{InMemorySurface, Surface};

#[derive(Parser)]
#[command(name = "packetflow", about = "Run the compliance review progress flow")]
struct Cli {
    /// Finalize endpoint to POST against; omitted means a canned local packet
    #[arg(long)]
    endpoint: Option<String>,

    /// Compress the simulated schedule by this factor (e.g. 100 for a quick run)
    #[arg(long, default_value_t = 1)]
    speedup: u32,
}

/// Offline transport that skips the network and answers with a demo packet
struct CannedTransport;

#[async_trait]
impl FinalizeTransport for CannedTransport {
    async fn finalize(&self, _endpoint: &str) -> FinalizeOutcome {
        FinalizeOutcome::Ready(PacketLocations {
            json_url: "/exports/DEMO.json".to_string(),
            csv_url: "/exports/DEMO.csv".to_string(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = FlowConfig {
        timeline: FlowConfig::default()
            .timeline
            .into_iter()
            .map(|e| TimelineEntry::new(e.delay / cli.speedup.max(1), e.stage))
            .collect(),
        ..FlowConfig::default()
    };

    let summary = match &cli.endpoint {
        Some(endpoint) => {
            let surface = InMemorySurface::compliance_page(Some(endpoint));
            run_flow(surface, HttpFinalizeTransport::new(), config).await
        }
        None => {
            let surface = InMemorySurface::compliance_page(Some("local:demo"));
            run_flow(surface, CannedTransport, config).await
        }
    };

    report(&summary);
    Ok(())
}

async fn run_flow<S: Surface, T: FinalizeTransport>(
    surface: S,
    transport: T,
    config: FlowConfig,
) -> FlowSummary {
    let mut controller = FlowController::new(surface, transport, config);
    controller.run().await
}

fn report(summary: &FlowSummary) {
    let stages: Vec<&str> = summary.completed.iter().map(|s| s.as_str()).collect();
    tracing::info!(completed = ?stages, "flow finished");
    match &summary.finalize_outcome {
        Some(FinalizeOutcome::Ready(locations)) => {
            println!("packet ready: {} / {}", locations.json_url, locations.csv_url);
        }
        Some(FinalizeOutcome::Declined) => println!("finalize declined by server"),
        Some(FinalizeOutcome::Failed(error)) => println!("finalize failed: {error}"),
        None => println!("flow ended without finalizing"),
    }
}

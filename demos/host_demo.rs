//! Host coordinator demo
//!
//! Runs two in-process agents behind a `HostAgent` and walks one
//! conversation through a follow-up question. Remote agents listed in
//! `HOST_REMOTE_AGENTS` (environment or `.env`) are resolved and registered
//! as well.
//!
//! ```sh
//! RUST_LOG=a2a_host=debug cargo run --example host_demo
//! ```

use std::sync::Arc;

use a2a_host::{
    host::RemoteAgentConnection,
    prelude::*,
    server::agent::default_content_types,
};
use async_trait::async_trait;
use tracing_subscriber::EnvFilter;

struct PowerAgent;

#[async_trait]
impl Agent for PowerAgent {
    async fn invoke(&self, query: &str, _session_id: &str) -> anyhow::Result<AgentResponse> {
        if query.to_lowercase().contains("colombo") {
            Ok(AgentResponse::completed(
                "No scheduled power interruptions in Colombo today.",
            ))
        } else {
            Ok(AgentResponse::input_required(
                "Which area should I check for power interruptions?",
            ))
        }
    }
}

struct HealthcareAgent;

#[async_trait]
impl Agent for HealthcareAgent {
    async fn invoke(&self, query: &str, _session_id: &str) -> anyhow::Result<AgentResponse> {
        if query.to_lowercase().contains("colombo") {
            Ok(AgentResponse::completed(
                "The National Hospital of Sri Lanka runs a 24 hour outpatient unit.",
            ))
        } else {
            Ok(AgentResponse::input_required("Which city are you in?"))
        }
    }
}

async fn register<A: Agent>(host: &HostAgent, agent: A, name: &str, description: &str, url: &str) {
    let card = AgentCard::new(name, description, url)
        .with_modes(default_content_types(), default_content_types());
    let manager = AgentTaskManager::new(agent, card);
    let connection = RemoteAgentConnection::new(manager.client());
    host.register_connection(manager.card().clone(), Arc::new(connection))
        .await;
}

fn print_delegation(delegation: &Delegation) -> anyhow::Result<()> {
    println!("  task {} is {:?}", delegation.task_id, delegation.state);
    for part in &delegation.parts {
        println!("  > {}", serde_json::to_string(part)?);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = HostConfig::from_env()?.with_resolution_policy(ResolutionPolicy::SkipUnreachable);
    let (host, skipped) = HostAgent::connect(config).await?;
    for err in &skipped {
        eprintln!("skipped: {}", err);
    }

    register(
        &host,
        PowerAgent,
        "ceb Agent",
        "Power interruption schedules from the electricity board",
        "http://localhost:10010/",
    )
    .await;
    register(
        &host,
        HealthcareAgent,
        "Healthcare Agent",
        "Finds hospitals and clinics",
        "http://localhost:10011/",
    )
    .await;

    println!("Available agents:\n{}\n", host.agents_summary().await);

    let conversation = "demo-conversation";
    for (agent, message) in [
        ("Healthcare Agent", "I need to see a doctor tonight"),
        ("Healthcare Agent", "Colombo"),
        ("ceb Agent", "Any power cuts in Colombo?"),
    ] {
        println!("{} <- {}", agent, message);
        match host.delegate(conversation, agent, message).await {
            Ok(delegation) => print_delegation(&delegation)?,
            Err(err) => eprintln!("  delegation failed: {}", err),
        }
    }

    let issue = Issue::new("Streetlight out", "Lamp post near the bus stop has been dark for a week")
        .with_divisions("Kollupitiya", "Colombo")
        .with_urgency(0.3)
        .with_classification(1, 4, 12);
    host.create_issue(issue).await?;

    Ok(())
}

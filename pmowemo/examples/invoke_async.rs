//! Invoke an action through the shared async client.
//!
//! Same arguments as `invoke_action`; the registry lives at the composition
//! root and is shut down explicitly once the call is done.
//!
//! ```text
//! cargo run --example invoke_async -- http://192.168.1.42:49153 \
//!     urn:Belkin:service:basicevent:1 /eventservice.xml /upnp/control/basicevent1 \
//!     GetBinaryState
//! ```

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use pmowemo::{DeviceInfo, Service, ServiceDescriptor, SessionRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 6 {
        eprintln!(
            "Usage: {} <base_url> <service_type> <scpd_path> <control_path> <action> [name=value ...]",
            args[0]
        );
        std::process::exit(1);
    }

    let base_url = args[1].trim_end_matches('/').to_string();
    let descriptor = ServiceDescriptor {
        service_type: args[2].clone(),
        scpd_url: args[3].clone(),
        control_url: args[4].clone(),
    };
    let action_name = args[5].clone();

    let device = Arc::new(device_from_base_url(&base_url));
    let sessions = Arc::new(SessionRegistry::new());

    // Service construction fetches the description synchronously
    let service = {
        let device = Arc::clone(&device) as Arc<dyn pmowemo::DeviceHandle>;
        let sessions = Arc::clone(&sessions);
        let base_url = base_url.clone();
        tokio::task::spawn_blocking(move || Service::new(device, &descriptor, &base_url, sessions))
            .await
            .context("Service construction task failed")??
    };

    println!("{}", service);

    let action = service
        .action(&action_name)
        .ok_or_else(|| anyhow!("Service {} has no action {}", service.name(), action_name))?;

    let call_args = parse_call_args(&args[6..]);
    let call_args: Vec<(&str, &str)> = call_args
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();

    let fields = action.invoke_async(&call_args).await?;
    for (name, value) in &fields {
        println!("{} = {}", name, value);
    }

    sessions.shutdown();

    Ok(())
}

/// "name=value" pairs from the command line, in the order given.
fn parse_call_args(raw: &[String]) -> Vec<(String, String)> {
    raw.iter()
        .filter_map(|pair| {
            pair.split_once('=')
                .map(|(name, value)| (name.to_string(), value.to_string()))
        })
        .collect()
}

/// Derive a throwaway device handle from the base URL authority.
fn device_from_base_url(base_url: &str) -> DeviceInfo {
    let authority = base_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(base_url);
    let authority = authority.split('/').next().unwrap_or(authority);

    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) => (host, port.parse().unwrap_or(80)),
        None => (authority, 80),
    };

    DeviceInfo::new(authority, host, port)
}

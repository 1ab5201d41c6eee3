//! Command execution
//!
//! Each command makes at most one request and prints its
//! result to standard output, one item per line or block.

use std::io::{self, Write};

use anyhow::Context;
use log::{info, warn};
use uaalert::{AlertsClient, ClientError, Region, Transport, REGIONS};

use crate::cli::Command;

/// A region argument, as typed by the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionArg<'a> {
    Uid(u32),
    Name(&'a str),
}

impl<'a> From<&'a str> for RegionArg<'a> {
    fn from(s: &'a str) -> Self {
        match s.trim().parse::<u32>() {
            Ok(uid) => RegionArg::Uid(uid),
            Err(_e) => RegionArg::Name(s),
        }
    }
}

/// Run the `command` against `client`, writing results to `out`
pub fn run<T, W>(command: &Command, client: &AlertsClient<T>, out: &mut W) -> anyhow::Result<()>
where
    T: Transport,
    W: Write,
{
    match command {
        Command::Active => {
            let alerts = client.active_alerts().map_err(explain)?;
            info!("{} active alerts", alerts.len());
            for alert in alerts {
                writeln!(out, "{}", alert)?;
            }
        }
        Command::Statuses { only } => {
            let mut statuses = client.alert_statuses().map_err(explain)?;
            if let Some(state) = only {
                statuses = statuses.filter((*state).into());
            }
            if !statuses.is_empty() {
                writeln!(out, "{}", statuses)?;
            }
        }
        Command::Status { region } => {
            let status = match RegionArg::from(region.as_str()) {
                RegionArg::Uid(uid) => client.alert_status(uid),
                RegionArg::Name(name) => client.alert_status_by_name(name),
            }
            .map_err(explain)?;
            writeln!(out, "{}", status)?;
        }
        Command::History { region } => {
            let alerts = match RegionArg::from(region.as_str()) {
                RegionArg::Uid(uid) => {
                    if Region::from_uid(uid).is_none() {
                        warn!("UID {} is not a known region", uid);
                    }
                    client.alert_history(uid)
                }
                RegionArg::Name(name) => client.alert_history_by_name(name),
            }
            .map_err(explain)?;
            info!("{} alerts in the last month", alerts.len());
            for alert in alerts {
                writeln!(out, "{}", alert)?;
            }
        }
        Command::Regions => print_regions(out)?,
    }

    Ok(())
}

/// Print the region directory, in canonical order
pub fn print_regions<W>(out: &mut W) -> io::Result<()>
where
    W: Write,
{
    for region in REGIONS.iter() {
        if region.aliases().is_empty() {
            writeln!(out, "{:>3}  {}", region.uid(), region.name())?;
        } else {
            writeln!(
                out,
                "{:>3}  {} ({})",
                region.uid(),
                region.name(),
                region.aliases().join(", ")
            )?;
        }
    }
    Ok(())
}

// Attach a hint for errors the user can fix
fn explain(err: ClientError) -> anyhow::Error {
    let hint = if err.is_invalid_argument() {
        Some("run \"uaalertctl regions\" to list known regions")
    } else if err.api_error().map(|e| e.status_code()) == Some(401) {
        Some("check --token or ALERTS_IN_UA_TOKEN")
    } else {
        None
    };

    match hint {
        Some(hint) => anyhow::Error::new(err).context(hint),
        None => anyhow::Error::new(err),
    }
}

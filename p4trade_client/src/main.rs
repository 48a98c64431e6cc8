//! P4 Trade Client — an interactive client that sends trade-decision queries
//! over a raw Ethernet link and prints the peer's answer.
//!
//! Each input line holds four whitespace-separated decimal numbers:
//! `identifier quantity bought_price current_price`. The line is parsed into
//! tokens, encoded into a fixed-layout binary frame, transmitted once on the
//! configured interface, and the first matching response within the timeout
//! window is decoded and reported (the decision byte plus the echoed values).
//!
//! Usage:
//! ```text
//! > 42 7 100 105
//! decision: 1 (sell)
//! identifier=42 quantity=7 bought_price=100 current_price=105
//! > quit
//! ```
//!
//! The interface name and response timeout are constants in
//! `p4trade_common::net`; there are no flags and no configuration file. Every
//! per-line failure is printed and the loop keeps running; only `quit`, end of
//! input, Ctrl+C, or a failure to open the interface at startup end the
//! process.
#![warn(missing_docs)]
mod session;

use std::io::{self, Write};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use log::{debug, info};
use pnet::packet::ethernet::EtherType;

use p4trade_common::frame::{RequestFrame, ResponseFrame};
use p4trade_common::net;
use p4trade_common::parser::parse_line;
use p4trade_common::{Result, TradeError};

use crate::session::{Session, destination_mac};

fn main() -> Result<(), TradeError> {
    init_logger();
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down client...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .expect("Error setting Ctrl+C handler");
    }

    // No interface means nothing to operate on; this is the only fatal path.
    let mut session = Session::open(net::INTERFACE)?;
    info!("Client is running. Enter four numbers per line, or \"quit\" to exit.");

    let mut line = String::new();
    while !shutdown.load(Ordering::Relaxed) {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if io::stdin().read_line(&mut line)? == 0 {
            break; // end of input
        }
        let input = line.trim_end_matches(['\r', '\n']);
        if input == "quit" {
            break;
        }
        if let Err(e) = run_request(&mut session, input) {
            println!("{e}");
        }
    }
    Ok(())
}

/// Drives one line through parser → codec → transport → codec and prints the
/// outcome. Any error is returned to the loop boundary for reporting.
fn run_request(session: &mut Session, line: &str) -> Result<(), TradeError> {
    let tokens = parse_line(line)?;
    let request = RequestFrame::from_tokens(&tokens)?;
    let payload = request.encode();
    debug!("request payload: {payload:02X?}");

    let reply = session.request(
        &payload,
        destination_mac(),
        EtherType::new(net::PROTOCOL_ETHERTYPE),
        net::RESPONSE_TIMEOUT,
    )?;
    match reply {
        Some(bytes) => {
            let response = ResponseFrame::decode(&bytes)?;
            match response.decision_label() {
                Some(label) => println!("decision: {} ({label})", response.decision),
                None => println!("decision: {}", response.decision),
            }
            println!(
                "identifier={} quantity={} bought_price={} current_price={}",
                response.identifier,
                response.quantity,
                response.bought_price,
                response.current_price
            );
        }
        None => println!("Didn't receive response"),
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

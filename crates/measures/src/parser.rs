//! Simulation log line parser
//!
//! Recognizes the line the simulator writes whenever a peer forwards a payload:
//!
//! ```text
//! <prefix> Peer <peer> forwarding <message_type> to <destinations> <time>
//! ```
//!
//! `<time>` is the last token, seconds since the run started with a comma
//! as decimal separator.

use contracts::{ContractError, ForwardedEvent, LogEvent};

const PEER_MARKER: &str = "Peer ";
const FORWARDING: &str = "forwarding ";
const TO: &str = " to ";

/// Parse one log line
///
/// - `Ok(None)`: not a forwarding line
/// - `Ok(Some(event))`: forwarding event
/// - `Err(LogParse)`: forwarding line with a malformed timestamp (line number 0)
pub fn parse_line(line: &str) -> Result<Option<LogEvent>, ContractError> {
    let line = line.trim_end();

    // The log4j prefix may itself mention a peer, so try every marker
    for (idx, _) in line.match_indices(PEER_MARKER) {
        let rest = &line[idx + PEER_MARKER.len()..];
        let Some((peer, rest)) = rest.split_once(' ') else {
            continue;
        };
        let Some(rest) = rest.strip_prefix(FORWARDING) else {
            continue;
        };
        if peer.is_empty() {
            continue;
        }

        return parse_forwarding(peer, rest);
    }

    Ok(None)
}

fn parse_forwarding(peer: &str, rest: &str) -> Result<Option<LogEvent>, ContractError> {
    let Some((message_type, rest)) = rest.split_once(TO) else {
        return Ok(None);
    };
    // "forwarding invalid composition message ..." and similar prose
    if message_type.is_empty() || message_type.contains(char::is_whitespace) {
        return Ok(None);
    }

    let (destinations, time) = match rest.rsplit_once(' ') {
        Some((destinations, time)) => (destinations.trim(), time),
        None => ("", rest),
    };
    let time = parse_timestamp(time)?;

    // "forwarding message to <peer> through <peer>" is a routing trace, not a payload
    let Some(destinations) = parse_destinations(destinations) else {
        return Ok(None);
    };

    Ok(Some(LogEvent::Forwarded(ForwardedEvent {
        peer: peer.to_string(),
        message_type: message_type.into(),
        destinations,
        time,
    })))
}

/// Parse a simulator timestamp (`12,345` or `12.345`)
pub fn parse_timestamp(token: &str) -> Result<f64, ContractError> {
    if token.contains(',') && token.contains('.') {
        return Err(ContractError::log_parse(
            0,
            format!("ambiguous timestamp '{token}'"),
        ));
    }

    let normalized = token.replacen(',', ".", 1);
    match normalized.parse::<f64>() {
        Ok(time) if time.is_finite() => Ok(time),
        _ => Err(ContractError::log_parse(
            0,
            format!("invalid timestamp '{token}'"),
        )),
    }
}

/// `[a:1, b:2]`, `[]` or a single bare id
fn parse_destinations(s: &str) -> Option<Vec<String>> {
    if let Some(inner) = s.strip_prefix('[') {
        let inner = inner.strip_suffix(']')?;
        return Some(
            inner
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect(),
        );
    }

    if s.is_empty() {
        return Some(Vec::new());
    }
    if s.contains(char::is_whitespace) {
        return None;
    }
    Some(vec![s.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forwarded(line: &str) -> ForwardedEvent {
        match parse_line(line) {
            Ok(Some(LogEvent::Forwarded(event))) => event,
            other => panic!("expected forwarded event, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_with_log4j_prefix() {
        let event = forwarded(
            "DEBUG graphcreation.collisionbased.CollisionGraphCreator  - Peer 3 forwarding \
             graphsearch.forward.message.FCompositionMessage to [S1:4, S2:7] 12,345",
        );
        assert_eq!(event.peer, "3");
        assert_eq!(
            event.message_type,
            "graphsearch.forward.message.FCompositionMessage"
        );
        assert_eq!(event.destinations, vec!["S1:4", "S2:7"]);
        assert!((event.time - 12.345).abs() < 1e-9);
    }

    #[test]
    fn test_parse_empty_and_single_destination() {
        let event = forwarded("Peer 1 forwarding a.Msg to [] 0,500");
        assert!(event.destinations.is_empty());

        let event = forwarded("Peer 1 forwarding a.Msg to S:2 1.5");
        assert_eq!(event.destinations, vec!["S:2"]);
        assert_eq!(event.time, 1.5);
    }

    #[test]
    fn test_trailing_whitespace() {
        let event = forwarded("Peer 9 forwarding a.Msg to [S:1] 03,000\r\n");
        assert_eq!(event.time, 3.0);
    }

    #[test]
    fn test_other_lines_are_ignored() {
        let lines = [
            "Peer 3 sending peer.message.BundleMessage 3-12 120 bytes 01,000",
            "Peer 3 forwarding composition through next service S:2 01,000",
            "Peer 3 forwarding message to 5 through 2 01,000",
            "Peer 3 forwarding invalid composition message M for successors [S:1] 01,000",
            "INFO Peer 3 initializing 00,010",
            "",
        ];
        for line in lines {
            assert!(matches!(parse_line(line), Ok(None)), "line: {line}");
        }
    }

    #[test]
    fn test_malformed_timestamp() {
        let result = parse_line("Peer 3 forwarding a.Msg to [S:1] soon");
        assert!(matches!(result, Err(ContractError::LogParse { .. })));
    }

    #[test]
    fn test_missing_timestamp() {
        let result = parse_line("Peer 3 forwarding a.Msg to [S:1, S:2]");
        assert!(matches!(result, Err(ContractError::LogParse { .. })));
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("00,000").unwrap(), 0.0);
        assert_eq!(parse_timestamp("120,250").unwrap(), 120.25);
        assert_eq!(parse_timestamp("-1,5").unwrap(), -1.5);
        assert!(parse_timestamp("1,000.5").is_err());
        assert!(parse_timestamp("NaN").is_err());
    }
}

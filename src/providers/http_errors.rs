use std::error::Error as StdError;
use std::io::ErrorKind;

use crate::error::TransportCause;

fn error_chain_has_io_kind(
    err: &(dyn StdError + 'static),
    kind: ErrorKind,
    needle: &str,
) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(source) = current {
        if let Some(io_err) = source.downcast_ref::<std::io::Error>()
            && io_err.kind() == kind
        {
            return true;
        }

        if source.to_string().to_ascii_lowercase().contains(needle) {
            return true;
        }

        current = source.source();
    }

    false
}

fn error_chain_has_connection_refused(err: &(dyn StdError + 'static)) -> bool {
    error_chain_has_io_kind(err, ErrorKind::ConnectionRefused, "connection refused")
}

fn error_chain_has_timeout(err: &(dyn StdError + 'static)) -> bool {
    error_chain_has_io_kind(err, ErrorKind::TimedOut, "timed out")
}

pub(crate) fn classify_request_error(
    err: &reqwest::Error,
    api_url: &str,
    timeout_secs: u64,
) -> TransportCause {
    if err.is_timeout() || error_chain_has_timeout(err) {
        return TransportCause::Timeout {
            api_url: api_url.to_string(),
            timeout_secs,
        };
    }

    if err.is_connect() {
        if error_chain_has_connection_refused(err) {
            return TransportCause::ConnectionRefused {
                api_url: api_url.to_string(),
            };
        }

        return TransportCause::Connect {
            api_url: api_url.to_string(),
        };
    }

    TransportCause::Other {
        api_url: api_url.to_string(),
        detail: err.to_string(),
    }
}

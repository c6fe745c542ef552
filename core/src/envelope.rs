//! Decoding of the `<Result>` envelope.
//!
//! A body is first checked for a `<Result>` root, then decoded into a
//! `Response` in one serde pass. `IsSuccess=false` is reported as
//! `ErrorKind::Envelope`, which carries the decoded response so the caller
//! still sees `error_message` and whatever payload came with it.

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use tracing::{debug, warn};

use crate::error::ErrorKind;
use crate::types::Response;

const ROOT: &[u8] = b"Result";

pub fn decode(bytes: &[u8]) -> Result<Response, ErrorKind> {
    let xml = std::str::from_utf8(bytes)
        .map_err(|e| ErrorKind::Decode(format!("body is not valid UTF-8: {e}")))?;
    let xml = xml.trim_start_matches('\u{feff}');

    check_root(xml)?;
    let mut response: Response =
        quick_xml::de::from_str(xml).map_err(|e| ErrorKind::Decode(e.to_string()))?;

    if !response.success {
        warn!(error_message = %response.error_message, "remote reported failure");
        return Err(ErrorKind::Envelope {
            message: response.error_message.clone(),
            response: Box::new(response),
        });
    }

    if !response.error_message.is_empty() {
        debug!(
            error_message = %response.error_message,
            "dropping error message from successful envelope"
        );
        response.error_message.clear();
    }
    debug!(
        contracts = response.contracts.len(),
        summaries = response.summaries.len(),
        property = response.property.is_some(),
        "decoded envelope"
    );
    Ok(response)
}

/// The first element must be `Result`, by local name.
fn check_root(xml: &str) -> Result<(), ErrorKind> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let name = e.local_name();
                if name.as_ref() == ROOT {
                    return Ok(());
                }
                return Err(ErrorKind::Decode(format!(
                    "expected element <Result> but found <{}>",
                    String::from_utf8_lossy(name.as_ref())
                )));
            }
            Ok(Event::Eof) => return Err(ErrorKind::Decode("empty document".to_string())),
            Err(e) => return Err(ErrorKind::Decode(format!("XML parse error: {e}"))),
            Ok(_) => {}
        }
    }
}

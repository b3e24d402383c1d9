//! Location stage: where in the caller's code the message was logged.
//!
//! Every public logging entry point is `#[track_caller]`, so with no frames to
//! skip the location is the direct caller of the logger. Wrappers that add
//! their own layers either mark themselves `#[track_caller]` as well or ask for
//! extra frames to be skipped, in which case a backtrace is captured and walked
//! past this crate's frames.

use std::backtrace::Backtrace;
use std::panic::Location;

const CRATE_PREFIX: &str = concat!(env!("CARGO_CRATE_NAME"), "::");

/// One frame of a rendered backtrace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub function: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

/// Location string for a call tracked at `caller`, `skip` frames further up.
#[must_use]
pub fn locate(caller: &Location<'_>, skip: usize) -> String {
    if skip > 0 {
        let trace = Backtrace::force_capture().to_string();
        if let Some(location) = caller_from_trace(&trace, CRATE_PREFIX, skip) {
            return location;
        }
    }
    format!("at {}:{}", caller.file(), caller.line())
}

/// Finds the frame `skip` levels above the first frame outside `crate_prefix`
/// that follows the crate's own frames.
#[must_use]
pub fn caller_from_trace(trace: &str, crate_prefix: &str, skip: usize) -> Option<String> {
    let is_own = |frame: &Frame| {
        frame
            .function
            .trim_start_matches('<')
            .starts_with(crate_prefix)
    };

    let frames = parse_frames(trace);
    let first_own = frames.iter().position(is_own)?;
    let frame = frames[first_own..]
        .iter()
        .skip_while(|f| is_own(*f))
        .filter(|f| f.file.is_some())
        .nth(skip)?;

    let file = frame.file.as_deref()?;
    let line = frame.line?;
    Some(format!("In {}() at {file}:{line}", short_function(&frame.function)))
}

/// Parses the `Display` form of [`Backtrace`].
#[must_use]
pub fn parse_frames(trace: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();

    for line in trace.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("at ") {
            let Some(frame) = frames.last_mut() else {
                continue;
            };
            // "path/to/file.rs:12:5"
            let mut parts = rest.rsplitn(3, ':');
            let _column = parts.next();
            let line_no = parts.next().and_then(|l| l.parse().ok());
            if let (Some(line_no), Some(file)) = (line_no, parts.next()) {
                frame.file = Some(file.to_string());
                frame.line = Some(line_no);
            }
        } else if let Some((index, function)) = line.split_once(": ")
            && index.chars().all(|c| c.is_ascii_digit())
        {
            frames.push(Frame {
                function: function.to_string(),
                file: None,
                line: None,
            });
        }
    }

    frames
}

/// `app::worker::run::h1234` -> `worker::run`.
fn short_function(function: &str) -> &str {
    let without_hash = function
        .rsplit_once("::h")
        .filter(|(_, hash)| hash.len() == 16 && hash.chars().all(|c| c.is_ascii_hexdigit()))
        .map_or(function, |(name, _)| name);
    let mut separators = without_hash.rmatch_indices("::");
    let _last = separators.next();
    separators
        .next()
        .map_or(without_hash, |(i, _)| &without_hash[i + 2..])
}

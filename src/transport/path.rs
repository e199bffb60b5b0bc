use url::Url;

use super::TransportError;

/// Expand a `/`-separated path template against `base`.
///
/// Every `{}` segment is replaced, in order, by the next entry of `args`. Segments are
/// percent-encoded, so phone numbers like `+15551234567` are safe to substitute. `.` and
/// `..` are refused: the URL parser would resolve them against the preceding segments.
pub fn expand_path(
    base: &Url,
    template: &'static str,
    args: &[&str],
) -> Result<Url, TransportError> {
    let expected = template
        .split('/')
        .filter(|segment| *segment == "{}")
        .count();
    if expected != args.len() {
        return Err(TransportError::PathArity {
            template,
            expected,
            actual: args.len(),
        });
    }
    if let Some(arg) = args.iter().find(|arg| is_dot_segment(arg)) {
        return Err(TransportError::DotSegment {
            template,
            value: (*arg).to_owned(),
        });
    }

    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| TransportError::CannotBeABase {
                base: base.to_string(),
            })?;
        segments.pop_if_empty();

        let mut args = args.iter();
        for segment in template.split('/').filter(|segment| !segment.is_empty()) {
            if segment == "{}" {
                if let Some(arg) = args.next() {
                    segments.push(arg);
                }
            } else {
                segments.push(segment);
            }
        }
    }
    Ok(url)
}

fn is_dot_segment(arg: &str) -> bool {
    let lowered = arg.to_ascii_lowercase().replace("%2e", ".");
    matches!(lowered.as_str(), "." | "..")
}

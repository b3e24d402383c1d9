//! printf-style rendering of id and text templates.
//!
//! Supports the verbs `s v d i f F e E g G x X o b q t c` and `%%`, the flags
//! `- + # 0` and space, a width, and a `.precision`. A conversion without a
//! matching argument ends the output: everything before it is returned and
//! nothing after it. Surplus arguments are ignored. A verb that does not fit its
//! argument (`%d` given a string) renders the argument as `%v` would.

use crate::detail::Value;
use regex::Regex;
use std::sync::LazyLock;

static CONVERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%([-+# 0]*)(\d+)?(?:\.(\d*))?([a-zA-Z%])").expect("Invalid conversion regex")
});

/// Widths and precisions above this are ignored.
const MAX_WIDTH: usize = 1_000_000;

#[derive(Debug, Clone, Copy, Default)]
struct Conversion {
    minus: bool,
    plus: bool,
    sharp: bool,
    zero: bool,
    space: bool,
    width: Option<usize>,
    precision: Option<usize>,
    verb: char,
}

impl Conversion {
    fn parse(caps: &regex::Captures<'_>) -> Self {
        let flags = caps.get(1).map_or("", |m| m.as_str());
        Self {
            minus: flags.contains('-'),
            plus: flags.contains('+'),
            sharp: flags.contains('#'),
            zero: flags.contains('0'),
            space: flags.contains(' '),
            width: caps
                .get(2)
                .and_then(|m| m.as_str().parse().ok())
                .filter(|w| *w <= MAX_WIDTH),
            // A bare "." means precision zero.
            precision: caps
                .get(3)
                .map(|m| m.as_str().parse().unwrap_or_default())
                .filter(|p| *p <= MAX_WIDTH),
            verb: caps
                .get(4)
                .and_then(|m| m.as_str().chars().next())
                .unwrap_or('v'),
        }
    }
}

/// Renders `template`, consuming one argument per conversion.
#[must_use]
pub fn sprintf(template: &str, args: &[&Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut last = 0;

    for caps in CONVERSION_REGEX.captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&template[last..whole.start()]);
        last = whole.end();

        let conversion = Conversion::parse(&caps);
        if conversion.verb == '%' {
            out.push('%');
            continue;
        }

        let Some(arg) = args.next() else {
            return out;
        };
        out.push_str(&render(&conversion, arg));
    }

    out.push_str(&template[last..]);
    out
}

/// Number of argument-consuming conversions in `template`.
#[must_use]
pub fn count_conversions(template: &str) -> usize {
    CONVERSION_REGEX
        .captures_iter(template)
        .filter(|caps| caps.get(4).is_some_and(|m| m.as_str() != "%"))
        .count()
}

/// `%v` rendering of a value.
#[must_use]
pub fn display(value: &Value) -> String {
    match value {
        Value::Nil => "<nil>".to_string(),
        Value::String(s) | Value::Error(s) | Value::Other(s) => s.clone(),
        Value::Int(n) => n.to_string(),
        Value::Float(f) => non_finite(*f).map_or_else(|| f.to_string(), String::from),
        Value::Bool(b) => b.to_string(),
        Value::Map(map) => serde_json::to_string(map).unwrap_or_default(),
    }
}

fn render(conversion: &Conversion, value: &Value) -> String {
    match (conversion.verb, value) {
        ('d' | 'i', Value::Int(n)) => render_int(conversion, *n, 10, ""),
        ('x', Value::Int(n)) => render_int(conversion, *n, 16, "0x"),
        ('X', Value::Int(n)) => render_int(conversion, *n, 16, "0X"),
        ('o', Value::Int(n)) => render_int(conversion, *n, 8, "0"),
        ('b', Value::Int(n)) => render_int(conversion, *n, 2, "0b"),
        ('c', Value::Int(n)) => u32::try_from(*n)
            .ok()
            .and_then(char::from_u32)
            .map_or_else(|| display(value), String::from),
        ('x' | 'X', Value::String(s)) => {
            let hex: String = s.bytes().map(|b| format!("{b:02x}")).collect();
            let hex = if conversion.verb == 'X' {
                hex.to_uppercase()
            } else {
                hex
            };
            pad_text(conversion, &hex)
        }
        ('f' | 'F' | 'e' | 'E' | 'g' | 'G', Value::Float(f)) => render_float(conversion, *f),
        #[allow(clippy::cast_precision_loss)]
        ('f' | 'F' | 'e' | 'E' | 'g' | 'G', Value::Int(n)) => render_float(conversion, *n as f64),
        ('q', _) => {
            let quoted = serde_json::to_string(&display(value)).unwrap_or_default();
            pad_text(conversion, &quoted)
        }
        _ => {
            let text = display(value);
            let text = match conversion.precision {
                Some(p) if matches!(conversion.verb, 's' | 'v') => text.chars().take(p).collect(),
                _ => text,
            };
            pad_text(conversion, &text)
        }
    }
}

fn render_int(conversion: &Conversion, n: i64, radix: u32, alt_prefix: &str) -> String {
    let magnitude = n.unsigned_abs();
    let mut digits = match radix {
        16 => format!("{magnitude:x}"),
        8 => format!("{magnitude:o}"),
        2 => format!("{magnitude:b}"),
        _ => magnitude.to_string(),
    };
    if conversion.verb == 'X' {
        digits = digits.to_uppercase();
    }
    if let Some(p) = conversion.precision
        && digits.len() < p
    {
        digits = format!("{}{digits}", "0".repeat(p - digits.len()));
    }
    let prefix = if conversion.sharp { alt_prefix } else { "" };
    pad_number(conversion, n < 0, prefix, &digits)
}

fn render_float(conversion: &Conversion, f: f64) -> String {
    if let Some(text) = non_finite(f) {
        return pad_text(conversion, text);
    }

    let magnitude = f.abs();
    let digits = match conversion.verb {
        'e' | 'E' => {
            let p = conversion.precision.unwrap_or(6);
            let raw = fix_exponent(&format!("{magnitude:.p$e}"));
            if conversion.verb == 'E' {
                raw.to_uppercase()
            } else {
                raw
            }
        }
        'g' | 'G' => conversion.precision.map_or_else(
            || magnitude.to_string(),
            |p| format!("{magnitude:.p$}"),
        ),
        _ => {
            let p = conversion.precision.unwrap_or(6);
            format!("{magnitude:.p$}")
        }
    };
    pad_number(conversion, f.is_sign_negative() && f != 0.0, "", &digits)
}

/// `NaN`, `+Inf` or `-Inf`; `None` for finite values.
#[must_use]
pub fn non_finite(f: f64) -> Option<&'static str> {
    if f.is_nan() {
        Some("NaN")
    } else if f.is_infinite() {
        Some(if f > 0.0 { "+Inf" } else { "-Inf" })
    } else {
        None
    }
}

/// Rust writes `1.5e0`; printf convention is `1.5e+00`.
fn fix_exponent(raw: &str) -> String {
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw.to_string();
    };
    let (sign, digits) = exponent
        .strip_prefix('-')
        .map_or(("+", exponent), |d| ("-", d));
    format!("{mantissa}e{sign}{digits:0>2}")
}

fn pad_number(conversion: &Conversion, negative: bool, prefix: &str, digits: &str) -> String {
    let sign = if negative {
        "-"
    } else if conversion.plus {
        "+"
    } else if conversion.space {
        " "
    } else {
        ""
    };
    let len = sign.len() + prefix.len() + digits.len();
    let fill = conversion.width.unwrap_or(0).saturating_sub(len);

    if conversion.minus {
        format!("{sign}{prefix}{digits}{}", " ".repeat(fill))
    } else if conversion.zero {
        format!("{sign}{prefix}{}{digits}", "0".repeat(fill))
    } else {
        format!("{}{sign}{prefix}{digits}", " ".repeat(fill))
    }
}

fn pad_text(conversion: &Conversion, text: &str) -> String {
    let fill = conversion
        .width
        .unwrap_or(0)
        .saturating_sub(text.chars().count());
    if conversion.minus {
        format!("{text}{}", " ".repeat(fill))
    } else {
        format!("{}{text}", " ".repeat(fill))
    }
}

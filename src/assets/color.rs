use crate::foundation::core::Rgba8;
use crate::foundation::error::{CardError, CardResult};

/// Progress accent used when no (usable) color is supplied.
pub const DEFAULT_PROGRESS_COLOR: Rgba8 = Rgba8::opaque(29, 185, 84);

/// Parse a CSS-style color string.
///
/// Accepted: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`, `rgb()`/`rgba()`, `hsl()`/`hsla()` and
/// `transparent`. Functional forms take comma or space separated arguments and an optional
/// `/ alpha`.
pub fn parse_color(s: &str) -> CardResult<Rgba8> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("transparent") {
        return Ok(Rgba8::TRANSPARENT);
    }
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex)
            .map_err(|e| CardError::configuration(format!("invalid color \"{s}\": {e}")));
    }

    let lower = s.to_ascii_lowercase();
    let parsed = if let Some(args) = functional_args(&lower, &["rgba", "rgb"]) {
        parse_rgb_args(&args)
    } else if let Some(args) = functional_args(&lower, &["hsla", "hsl"]) {
        parse_hsl_args(&args)
    } else {
        Err("unsupported color syntax".to_owned())
    };
    parsed.map_err(|e| CardError::configuration(format!("invalid color \"{s}\": {e}")))
}

/// Channel triple used to tint the progress glow.
///
/// Lenient: `#RRGGBB` is read as hex pairs, anything starting with `rgb` takes the
/// first three runs of digits, and every other input (or none) yields the default green.
pub fn progress_channels(color: Option<&str>) -> [u8; 3] {
    let fallback = [
        DEFAULT_PROGRESS_COLOR.r,
        DEFAULT_PROGRESS_COLOR.g,
        DEFAULT_PROGRESS_COLOR.b,
    ];
    let Some(color) = color.map(str::trim).filter(|c| !c.is_empty()) else {
        return fallback;
    };

    if let Some(hex) = color.strip_prefix('#') {
        return match (hex.get(0..2), hex.get(2..4), hex.get(4..6)) {
            (Some(r), Some(g), Some(b)) => match (hex_byte(r), hex_byte(g), hex_byte(b)) {
                (Ok(r), Ok(g), Ok(b)) => [r, g, b],
                _ => fallback,
            },
            _ => fallback,
        };
    }

    if color.starts_with("rgb") {
        let runs: Vec<u8> = color
            .split(|c: char| !c.is_ascii_digit())
            .filter(|run| !run.is_empty())
            .take(3)
            .map(|run| run.parse::<u32>().map_or(255, |v| v.min(255) as u8))
            .collect();
        if let [r, g, b] = runs[..] {
            return [r, g, b];
        }
    }

    fallback
}

/// Color for the solid progress bar: full parse of `color`, default green otherwise.
pub fn progress_bar_color(color: Option<&str>) -> Rgba8 {
    color
        .and_then(|c| parse_color(c).ok())
        .unwrap_or(DEFAULT_PROGRESS_COLOR)
}

fn functional_args(s: &str, names: &[&str]) -> Option<Vec<String>> {
    let name = names.iter().find(|n| s.starts_with(**n))?;
    let inner = s[name.len()..]
        .trim()
        .strip_prefix('(')?
        .strip_suffix(')')?;
    Some(
        inner
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .map(str::to_owned)
            .collect(),
    )
}

fn parse_number(arg: &str) -> Result<(f64, bool), String> {
    let (num, pct) = match arg.strip_suffix('%') {
        Some(n) => (n, true),
        None => (arg, false),
    };
    let v: f64 = num
        .parse()
        .map_err(|_| format!("invalid number \"{arg}\""))?;
    if !v.is_finite() {
        return Err(format!("invalid number \"{arg}\""));
    }
    Ok((v, pct))
}

fn parse_alpha(args: &[String], idx: usize) -> Result<f64, String> {
    match args.get(idx) {
        None => Ok(1.0),
        Some(a) => {
            let (v, pct) = parse_number(a)?;
            Ok(if pct { v / 100.0 } else { v }.clamp(0.0, 1.0))
        }
    }
}

fn parse_rgb_args(args: &[String]) -> Result<Rgba8, String> {
    if args.len() != 3 && args.len() != 4 {
        return Err("rgb() takes 3 or 4 arguments".to_owned());
    }
    let mut ch = [0u8; 3];
    for (i, out) in ch.iter_mut().enumerate() {
        let (v, pct) = parse_number(&args[i])?;
        let v = if pct { v / 100.0 * 255.0 } else { v };
        *out = v.round().clamp(0.0, 255.0) as u8;
    }
    let a = parse_alpha(args, 3)?;
    Ok(Rgba8::new(ch[0], ch[1], ch[2], (a * 255.0).round() as u8))
}

fn parse_hsl_args(args: &[String]) -> Result<Rgba8, String> {
    if args.len() != 3 && args.len() != 4 {
        return Err("hsl() takes 3 or 4 arguments".to_owned());
    }
    let h = parse_number(args[0].trim_end_matches("deg"))?.0;
    let (s, _) = parse_number(&args[1])?;
    let (l, _) = parse_number(&args[2])?;
    let a = parse_alpha(args, 3)?;
    Ok(hsla_to_rgba(h, s / 100.0, l / 100.0, a))
}

fn hex_byte(pair: &str) -> Result<u8, String> {
    u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    fn nibble(c: &str) -> Result<u8, String> {
        let v = u8::from_str_radix(c, 16).map_err(|_| format!("invalid hex digit \"{c}\""))?;
        Ok(v * 17)
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }
    match s.len() {
        3 | 4 => {
            let r = nibble(&s[0..1])?;
            let g = nibble(&s[1..2])?;
            let b = nibble(&s[2..3])?;
            let a = if s.len() == 4 { nibble(&s[3..4])? } else { 255 };
            Ok(Rgba8::new(r, g, b, a))
        }
        6 | 8 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            let a = if s.len() == 8 { hex_byte(&s[6..8])? } else { 255 };
            Ok(Rgba8::new(r, g, b, a))
        }
        _ => Err("hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA".to_owned()),
    }
}

fn hsla_to_rgba(h: f64, s: f64, l: f64, a: f64) -> Rgba8 {
    fn to_u8(x: f64) -> u8 {
        (x.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return Rgba8::new(to_u8(l), to_u8(l), to_u8(l), to_u8(a));
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Rgba8::new(
        to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_u8(hue_to_rgb(p, q, h)),
        to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        to_u8(a),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;

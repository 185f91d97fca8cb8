//! Variable and unit names to axis labels
//!
//! Simulation states and their units are named with a small ASCII convention:
//!
//! - `/` separates a numerator from denominators: `mol/L`
//! - `**` marks an exponent: `m**3`
//! - `_` marks a subscript: `C_A`
//! - Greek letters are spelled out: `mu_1`, `rho`
//!
//! [`latexify_name`] turns such a name into a mathtext/LaTeX string, while
//! [`unicode_label`] renders the same structure as plain Unicode text, which is
//! what raster and SVG backends can draw directly.
//!
//! | Name | LaTeX | Unicode |
//! |------|-------|---------|
//! | `C_A` | `$C_{A}$` | `C_A` |
//! | `k**2` | `$k^{2}$` | `k²` |
//! | `mu_1` | `$\mu_{1}$` | `μ₁` |
//! | `mol/L` (units) | `$\mathregular{mol \ L^{-1}}$` | `mol L⁻¹` |
//! | `kg/m**3` (units) | `$\mathregular{kg \ m^{-3}}$` | `kg m⁻³` |

/// Greek letter tokens recognized in names, with their Unicode glyphs
pub const GREEK_TOKENS: [(&str, char); 11] = [
    ("alpha", 'α'),
    ("beta", 'β'),
    ("gamma", 'γ'),
    ("phi", 'φ'),
    ("rho", 'ρ'),
    ("epsilon", 'ε'),
    ("sigma", 'σ'),
    ("mu", 'μ'),
    ("nu", 'ν'),
    ("psi", 'ψ'),
    ("pi", 'π'),
];

/// Kind of script attached to a label part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    /// `**` in the name, `^` in LaTeX
    Superscript,
    /// `_` in the name and in LaTeX
    Subscript,
}

impl ScriptKind {
    fn latex_marker(self) -> char {
        match self {
            ScriptKind::Superscript => '^',
            ScriptKind::Subscript => '_',
        }
    }
}

/// One `/`-separated part of a name
#[derive(Debug, Clone, PartialEq, Eq)]
struct LabelPart<'a> {
    base: &'a str,
    script: Option<(ScriptKind, Vec<&'a str>)>,
    /// Parts after the first one are denominators
    inverse: bool,
}

fn parse(name: &str) -> Vec<LabelPart<'_>> {
    name.split('/')
        .enumerate()
        .map(|(count, part)| {
            let split = if part.contains("**") {
                Some((ScriptKind::Superscript, part.split("**").collect::<Vec<_>>()))
            } else if part.contains('_') {
                Some((ScriptKind::Subscript, part.split('_').collect::<Vec<_>>()))
            } else {
                None
            };

            match split {
                Some((kind, segments)) => LabelPart {
                    base: segments[0],
                    script: Some((kind, segments[1..].to_vec())),
                    inverse: count > 0,
                },
                None => LabelPart {
                    base: part,
                    script: None,
                    inverse: count > 0,
                },
            }
        })
        .collect()
}

fn greek_glyph(token: &str) -> Option<char> {
    GREEK_TOKENS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, glyph)| *glyph)
}

fn latex_token(token: &str) -> String {
    if greek_glyph(token).is_some() {
        format!("\\{}", token)
    } else {
        token.to_string()
    }
}

fn unicode_token(token: &str) -> String {
    match greek_glyph(token) {
        Some(glyph) => glyph.to_string(),
        None => token.to_string(),
    }
}

/// Format a variable or unit name as a LaTeX label
///
/// With `units = true` the label is wrapped in `\mathregular{}` so that unit
/// symbols are drawn upright, matching the surrounding axis text.
///
/// Segments past the second of a scripted part are kept and joined with `,`
/// (`C_A_in` gives `C_{A,in}`), and Greek tokens are escaped in plain
/// denominators as well (`1/mu` gives `1 \ \mu^{-1}`). Ports of older label
/// code that kept only the first script segment, or left denominators raw,
/// will see different output for those names.
///
/// # Examples
///
/// ```rust
/// use procplot::labels::latexify_name;
///
/// assert_eq!(latexify_name("C_A", false), "$C_{A}$");
/// assert_eq!(latexify_name("k**2", false), "$k^{2}$");
/// assert_eq!(latexify_name("mol/L", true), "$\\mathregular{mol \\ L^{-1}}$");
/// ```
pub fn latexify_name(name: &str, units: bool) -> String {
    let parts: Vec<String> = parse(name)
        .into_iter()
        .map(|part| {
            let base = latex_token(part.base);
            match part.script {
                None if part.inverse => format!("{}^{{-1}}", base),
                None => base,
                Some((kind, segments)) => {
                    let script: Vec<String> = segments.iter().map(|s| latex_token(s)).collect();
                    format!(
                        "{}{}{{{}{}}}",
                        base,
                        kind.latex_marker(),
                        if part.inverse { "-" } else { "" },
                        script.join(","),
                    )
                }
            }
        })
        .collect();

    let body = parts.join(" \\ ");

    if units {
        format!("$\\mathregular{{{}}}$", body)
    } else {
        format!("${}$", body)
    }
}

fn superscript_char(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '-' => '⁻',
        '+' => '⁺',
        'n' => 'ⁿ',
        'i' => 'ⁱ',
        _ => return None,
    })
}

fn subscript_char(c: char) -> Option<char> {
    Some(match c {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '-' => '₋',
        '+' => '₊',
        'a' => 'ₐ',
        'e' => 'ₑ',
        'o' => 'ₒ',
        'x' => 'ₓ',
        'h' => 'ₕ',
        'k' => 'ₖ',
        'l' => 'ₗ',
        'm' => 'ₘ',
        'n' => 'ₙ',
        'p' => 'ₚ',
        's' => 'ₛ',
        't' => 'ₜ',
        _ => return None,
    })
}

/// Render script text with Unicode script glyphs, or with an ASCII marker when
/// any character has no glyph.
fn unicode_script(kind: ScriptKind, text: &str) -> String {
    let glyph = match kind {
        ScriptKind::Superscript => superscript_char,
        ScriptKind::Subscript => subscript_char,
    };

    if !text.is_empty()
        && let Some(mapped) = text.chars().map(glyph).collect::<Option<String>>()
    {
        return mapped;
    }

    let marker = kind.latex_marker();
    if text.chars().count() == 1 {
        format!("{}{}", marker, text)
    } else {
        format!("{}({})", marker, text)
    }
}

/// Format a variable or unit name as plain Unicode text
///
/// Same parsing rules as [`latexify_name`], but the output is meant to be drawn
/// verbatim: Greek letters become their glyphs, digits and signs in scripts use
/// Unicode super/subscripts, and denominators get a `⁻¹`-style exponent.
///
/// # Examples
///
/// ```rust
/// use procplot::labels::unicode_label;
///
/// assert_eq!(unicode_label("mu_1"), "μ₁");
/// assert_eq!(unicode_label("m**3/s"), "m³ s⁻¹");
/// assert_eq!(unicode_label("C_A"), "C_A");
/// ```
pub fn unicode_label(name: &str) -> String {
    let parts: Vec<String> = parse(name)
        .into_iter()
        .map(|part| {
            let base = unicode_token(part.base);
            match part.script {
                None if part.inverse => format!("{}⁻¹", base),
                None => base,
                Some((kind, segments)) => {
                    let script: Vec<String> = segments.iter().map(|s| unicode_token(s)).collect();
                    let mut text = script.join(",");
                    if part.inverse {
                        text.insert(0, '-');
                    }
                    format!("{}{}", base, unicode_script(kind, &text))
                }
            }
        })
        .collect();

    parts.join(" ")
}

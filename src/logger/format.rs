//! Permissive printf-style interpolation.
//!
//! Placeholders are `%[flags][width][.precision]verb`, where width and
//! precision may be `*` (taken from the next argument) and an explicit
//! argument index `[n]` may precede the width, the precision or the verb. A
//! mismatch between the template and its arguments never fails; the problem
//! is rendered inline instead (`%!d(MISSING)`, `%!d(string=abc)`,
//! `%!(EXTRA int=1)`, `%!d(BADINDEX)`, `%!(BADWIDTH)`).

use std::fmt;
use std::fmt::Write as _;
use std::iter::Peekable;
use std::str::Chars;

/// One interpolation argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Char(char),
    Str(String),
}

impl Arg {
    fn type_name(&self) -> &'static str {
        match self {
            Arg::Bool(_) => "bool",
            Arg::Int(_) => "int",
            Arg::Uint(_) => "uint",
            Arg::Float(_) => "float64",
            Arg::Char(_) => "char",
            Arg::Str(_) => "string",
        }
    }
}

macro_rules! impl_from_number {
    ($variant:ident, $target:ty; $($t:ty),*) => {
        $(
            impl From<$t> for Arg {
                fn from(v: $t) -> Self {
                    Arg::$variant(v as $target)
                }
            }
        )*
    };
}

impl_from_number!(Int, i64; i8, i16, i32, i64, isize);
impl_from_number!(Uint, u64; u8, u16, u32, u64, usize);
impl_from_number!(Float, f64; f32, f64);

impl From<bool> for Arg {
    fn from(v: bool) -> Self {
        Arg::Bool(v)
    }
}

impl From<char> for Arg {
    fn from(v: char) -> Self {
        Arg::Char(v)
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Arg::Str(v.to_string())
    }
}

impl From<String> for Arg {
    fn from(v: String) -> Self {
        Arg::Str(v)
    }
}

impl From<&String> for Arg {
    fn from(v: &String) -> Self {
        Arg::Str(v.clone())
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match render('v', &Spec::default(), self) {
            Some(piece) => write!(f, "{}{}", piece.sign, piece.body),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
struct Spec {
    minus: bool,
    plus: bool,
    space: bool,
    zero: bool,
    sharp: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

struct Piece {
    sign: &'static str,
    body: String,
    numeric: bool,
}

impl Piece {
    fn text(body: String) -> Self {
        Piece {
            sign: "",
            body,
            numeric: false,
        }
    }
}

/// Position in the argument list while walking a template.
struct Cursor {
    next: usize,
    len: usize,
    /// An explicit `[n]` index was seen; unused arguments are then not reported.
    reordered: bool,
    good_index: bool,
}

impl Cursor {
    /// Consumes a `[n]` argument index (1-based) if one starts here.
    fn take_index(&mut self, chars: &mut Peekable<Chars<'_>>) -> bool {
        if chars.peek() != Some(&'[') {
            return false;
        }
        chars.next();
        self.reordered = true;

        let mut lookahead = chars.clone();
        let mut digits = String::new();
        let closed = lookahead.by_ref().any(|c| {
            if c == ']' {
                true
            } else {
                digits.push(c);
                false
            }
        });
        if !closed {
            self.good_index = false;
            return false;
        }
        *chars = lookahead;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            self.good_index = false;
            return false;
        }
        match digits.parse::<usize>() {
            Ok(n) if (1..=self.len).contains(&n) => self.next = n - 1,
            _ => self.good_index = false,
        }
        true
    }

    /// Consumes the argument feeding a `*` width or precision.
    fn take_int(&mut self, args: &[Arg]) -> Option<i64> {
        let value = match args.get(self.next) {
            Some(Arg::Int(v)) => Some(*v),
            Some(Arg::Uint(v)) => i64::try_from(*v).ok(),
            _ => None,
        };
        if self.next < self.len {
            self.next += 1;
        }
        value.filter(|v| (-MAX_STAR_ARG..=MAX_STAR_ARG).contains(v))
    }
}

const MAX_STAR_ARG: i64 = 1_000_000;

/// Interpolates `args` into `template`.
pub fn sprintf(template: &str, args: &[Arg]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut chars = template.chars().peekable();
    let mut cursor = Cursor {
        next: 0,
        len: args.len(),
        reordered: false,
        good_index: true,
    };

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut spec = Spec::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => spec.minus = true,
                '+' => spec.plus = true,
                ' ' => spec.space = true,
                '0' => spec.zero = true,
                '#' => spec.sharp = true,
                _ => break,
            }
            chars.next();
        }
        cursor.good_index = true;

        let mut after_index = cursor.take_index(&mut chars);
        if chars.peek() == Some(&'*') {
            chars.next();
            match cursor.take_int(args) {
                Some(width) => {
                    if width < 0 {
                        spec.minus = true;
                        spec.zero = false;
                    }
                    spec.width = Some(width.unsigned_abs() as usize);
                }
                None => out.push_str("%!(BADWIDTH)"),
            }
            after_index = false;
        } else {
            spec.width = take_number(&mut chars);
            if after_index && spec.width.is_some() {
                cursor.good_index = false;
            }
        }

        if chars.peek() == Some(&'.') {
            chars.next();
            if after_index {
                cursor.good_index = false;
            }
            after_index = cursor.take_index(&mut chars);
            if chars.peek() == Some(&'*') {
                chars.next();
                match cursor.take_int(args) {
                    Some(precision) => spec.precision = usize::try_from(precision).ok(),
                    None => out.push_str("%!(BADPREC)"),
                }
                after_index = false;
            } else {
                spec.precision = Some(take_number(&mut chars).unwrap_or(0));
            }
        }

        if !after_index {
            cursor.take_index(&mut chars);
        }

        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }
        if !cursor.good_index {
            let _ = write!(out, "%!{verb}(BADINDEX)");
            continue;
        }

        match args.get(cursor.next) {
            Some(arg) => {
                cursor.next += 1;
                if verb == 'T' {
                    pad(&mut out, &spec, Piece::text(arg.type_name().to_string()));
                    continue;
                }
                match render(verb, &spec, arg) {
                    Some(piece) => pad(&mut out, &spec, piece),
                    None => {
                        let _ = write!(out, "%!{verb}({}={arg})", arg.type_name());
                    }
                }
            }
            None => {
                let _ = write!(out, "%!{verb}(MISSING)");
            }
        }
    }

    let unused = args.get(cursor.next..).filter(|rest| !rest.is_empty());
    if let Some(extra) = unused.filter(|_| !cursor.reordered) {
        out.push_str("%!(EXTRA ");
        for (i, arg) in extra.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}={arg}", arg.type_name());
        }
        out.push(')');
    }

    out
}

fn take_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        value = Some(
            value
                .unwrap_or(0)
                .saturating_mul(10)
                .saturating_add(digit as usize),
        );
    }
    value
}

fn pad(out: &mut String, spec: &Spec, piece: Piece) {
    let len = piece.sign.len() + piece.body.chars().count();
    let fill = spec.width.unwrap_or(0).saturating_sub(len);
    if spec.minus {
        out.push_str(piece.sign);
        out.push_str(&piece.body);
        out.extend(std::iter::repeat_n(' ', fill));
    } else if spec.zero && piece.numeric {
        out.push_str(piece.sign);
        out.extend(std::iter::repeat_n('0', fill));
        out.push_str(&piece.body);
    } else {
        out.extend(std::iter::repeat_n(' ', fill));
        out.push_str(piece.sign);
        out.push_str(&piece.body);
    }
}

/// Renders one argument, or `None` when the verb does not apply to its type.
fn render(verb: char, spec: &Spec, arg: &Arg) -> Option<Piece> {
    let piece = match (verb, arg) {
        ('v' | 't', Arg::Bool(b)) => Piece::text(b.to_string()),
        ('v' | 'd', Arg::Int(v)) => integer(spec, *v < 0, v.unsigned_abs(), 10, false),
        ('v' | 'd', Arg::Uint(v)) => integer(spec, false, *v, 10, false),
        ('d', Arg::Char(c)) => integer(spec, false, u64::from(*c as u32), 10, false),
        ('x' | 'X' | 'o' | 'b', Arg::Int(v)) => {
            integer(spec, *v < 0, v.unsigned_abs(), radix(verb), verb == 'X')
        }
        ('x' | 'X' | 'o' | 'b', Arg::Uint(v)) => integer(spec, false, *v, radix(verb), verb == 'X'),
        ('x' | 'X', Arg::Str(s)) => {
            let mut hex = String::with_capacity(s.len() * 2);
            for byte in s.bytes() {
                let _ = if verb == 'X' {
                    write!(hex, "{byte:02X}")
                } else {
                    write!(hex, "{byte:02x}")
                };
            }
            Piece::text(hex)
        }
        ('v' | 'f' | 'F' | 'e' | 'E' | 'g' | 'G', Arg::Float(v)) => float(spec, verb, *v),
        ('v' | 'c', Arg::Char(c)) => Piece::text(c.to_string()),
        ('c', Arg::Int(v)) => Piece::text(code_point(u64::try_from(*v).unwrap_or(u64::MAX))),
        ('c', Arg::Uint(v)) => Piece::text(code_point(*v)),
        ('v' | 's', Arg::Str(s)) => Piece::text(truncate(s, spec.precision)),
        ('q', Arg::Str(s)) => Piece::text(format!("{:?}", truncate(s, spec.precision))),
        ('q', Arg::Char(c)) => Piece::text(format!("{c:?}")),
        _ => return None,
    };
    Some(piece)
}

fn radix(verb: char) -> u32 {
    match verb {
        'o' => 8,
        'b' => 2,
        _ => 16,
    }
}

fn sign(spec: &Spec, negative: bool) -> &'static str {
    if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    }
}

fn integer(spec: &Spec, negative: bool, magnitude: u64, radix: u32, upper: bool) -> Piece {
    let digits = match (radix, upper) {
        (16, true) => format!("{magnitude:X}"),
        (16, false) => format!("{magnitude:x}"),
        (8, _) => format!("{magnitude:o}"),
        (2, _) => format!("{magnitude:b}"),
        _ => magnitude.to_string(),
    };
    let mut body = String::new();
    if spec.sharp {
        body.push_str(match (radix, upper) {
            (16, true) => "0X",
            (16, false) => "0x",
            (8, _) => "0",
            (2, _) => "0b",
            _ => "",
        });
    }
    if let Some(min_digits) = spec.precision {
        body.extend(std::iter::repeat_n('0', min_digits.saturating_sub(digits.len())));
    }
    body.push_str(&digits);
    Piece {
        sign: sign(spec, negative),
        body,
        numeric: spec.precision.is_none(),
    }
}

fn float(spec: &Spec, verb: char, v: f64) -> Piece {
    if v.is_nan() {
        return Piece::text("NaN".to_string());
    }
    let negative = v.is_sign_negative();
    if v.is_infinite() {
        return Piece {
            sign: if negative { "-" } else { "+" },
            body: "Inf".to_string(),
            numeric: false,
        };
    }

    let magnitude = v.abs();
    let upper = verb.is_ascii_uppercase();
    let body = match verb {
        'f' | 'F' => format!("{:.*}", spec.precision.unwrap_or(6), magnitude),
        'e' | 'E' => exponent_form(
            format!("{:.*e}", spec.precision.unwrap_or(6), magnitude),
            upper,
        ),
        _ => general(magnitude, spec.precision, spec.sharp, upper),
    };
    Piece {
        sign: sign(spec, negative),
        body,
        numeric: true,
    }
}

/// Shortest-form `%v`/`%g` switch to an exponent from 1e6 upwards.
const SHORTEST_EXPONENT_LIMIT: i32 = 6;

/// `%g`: scientific notation for very large or small exponents, plain otherwise.
fn general(magnitude: f64, precision: Option<usize>, keep_zeros: bool, upper: bool) -> String {
    let Some(precision) = precision else {
        let shortest = format!("{magnitude:e}");
        let exp = exponent_of(&shortest);
        return if exp < -4 || exp >= SHORTEST_EXPONENT_LIMIT {
            exponent_form(shortest, upper)
        } else {
            magnitude.to_string()
        };
    };

    let significant = precision.max(1);
    let scientific = format!("{:.*e}", significant - 1, magnitude);
    let exp = exponent_of(&scientific);
    let body = if exp < -4 || exp >= significant as i32 {
        exponent_form(scientific, upper)
    } else {
        let decimals = (significant as i32 - 1 - exp).max(0) as usize;
        format!("{magnitude:.decimals$}")
    };
    if keep_zeros {
        body
    } else {
        trim_fraction(&body)
    }
}

fn exponent_of(scientific: &str) -> i32 {
    scientific
        .split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0)
}

/// Rewrites `1.5e3` as `1.5e+03`.
fn exponent_form(scientific: String, upper: bool) -> String {
    let Some((mantissa, exp)) = scientific.split_once('e') else {
        return scientific;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let marker = if upper { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}{marker}{sign}{:02}", exp.unsigned_abs())
}

fn trim_fraction(body: &str) -> String {
    let (number, exp) = match body.find(['e', 'E']) {
        Some(at) => body.split_at(at),
        None => (body, ""),
    };
    let number = if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    };
    format!("{number}{exp}")
}

fn truncate(s: &str, precision: Option<usize>) -> String {
    match precision {
        Some(max) => s.chars().take(max).collect(),
        None => s.to_string(),
    }
}

fn code_point(v: u64) -> String {
    u32::try_from(v)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
        .to_string()
}

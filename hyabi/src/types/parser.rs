//! Parser for canonical type signatures.
//!
//! Accepts the notation used by contract ABIs: `uint256`, `bytes32[]`,
//! `(address to,uint256 amount)[2]`, `tuple(bool,string)`. Bare `uint` and
//! `int` default to 256 bits. Array suffixes apply left to right, so
//! `uint8[2][]` is a dynamic array of `uint8[2]`.
use chumsky::{prelude::*, text::digits};

use crate::{
    error::{AbiError, AbiResult},
    types::{
        AbiType,
        aggregate::{ArrayType, TupleParam, TupleType},
        primary::{FixedBytesType, IntType},
    },
};

pub fn whitespace<'src>() -> impl Parser<'src, &'src str, (), extra::Err<Rich<'src, char>>> + Clone
{
    any()
        .filter(|c: &char| c.is_whitespace())
        .repeated()
        .at_least(1)
        .ignored()
        .labelled("whitespace")
}

fn width_parser<'src>(
    keyword: &'static str,
) -> impl Parser<'src, &'src str, Option<u32>, extra::Err<Rich<'src, char>>> + Clone {
    just(keyword).ignore_then(
        digits(10)
            .to_slice()
            .try_map(move |digits: &str, span| {
                digits.parse::<u32>().map_err(|_| {
                    Rich::custom(span, format!("invalid width `{}` for `{}`", digits, keyword))
                })
            })
            .or_not(),
    )
}

fn checked_int_type<'src>(
    bits: Option<u32>,
    span: SimpleSpan,
) -> Result<IntType, Rich<'src, char>> {
    let bits = bits.unwrap_or(IntType::MAX_BITS);
    IntType::new(bits).ok_or_else(|| {
        Rich::custom(
            span,
            format!(
                "integer width must be a multiple of 8 between {} and {}, got {}",
                IntType::MIN_BITS,
                IntType::MAX_BITS,
                bits
            ),
        )
    })
}

pub fn int_type_parser<'src>()
-> impl Parser<'src, &'src str, AbiType, extra::Err<Rich<'src, char>>> + Clone {
    choice((
        width_parser("uint")
            .try_map(checked_int_type)
            .map(AbiType::Uint),
        width_parser("int")
            .try_map(checked_int_type)
            .map(AbiType::Int),
    ))
    .labelled("integer type")
}

pub fn bytes_type_parser<'src>()
-> impl Parser<'src, &'src str, AbiType, extra::Err<Rich<'src, char>>> + Clone {
    width_parser("bytes")
        .try_map(|size, span| match size {
            None => Ok(AbiType::Bytes),
            Some(size) => FixedBytesType::new(size as usize)
                .map(AbiType::FixedBytes)
                .ok_or_else(|| {
                    Rich::custom(
                        span,
                        format!("fixed bytes size must be between 1 and 32, got {}", size),
                    )
                }),
        })
        .labelled("bytes type")
}

pub fn elementary_type_parser<'src>()
-> impl Parser<'src, &'src str, AbiType, extra::Err<Rich<'src, char>>> + Clone {
    choice((
        int_type_parser(),
        bytes_type_parser(),
        just("bool").to(AbiType::Bool),
        just("address").to(AbiType::Address),
        just("string").to(AbiType::String),
    ))
    .labelled("elementary type")
}

fn array_suffix_parser<'src>()
-> impl Parser<'src, &'src str, Option<usize>, extra::Err<Rich<'src, char>>> + Clone {
    digits(10)
        .to_slice()
        .try_map(|digits: &str, span| match digits.parse::<usize>() {
            Ok(0) => Err(Rich::custom(span, "fixed array length must be at least 1")),
            Ok(len) => Ok(len),
            Err(_) => Err(Rich::custom(span, format!("invalid array length: {}", digits))),
        })
        .or_not()
        .padded()
        .delimited_by(just("["), just("]"))
        .labelled("array suffix")
}

pub fn type_parser<'src>()
-> impl Parser<'src, &'src str, AbiType, extra::Err<Rich<'src, char>>> + Clone {
    recursive(|tree| {
        let component = tree
            .clone()
            .then(
                whitespace()
                    .ignore_then(text::ident().map(|name: &str| name.to_string()))
                    .or_not(),
            )
            .map(|(ty, name)| TupleParam::new(name.unwrap_or_default(), ty))
            .padded();

        let tuple = just("tuple")
            .or_not()
            .ignore_then(
                component
                    .separated_by(just(","))
                    .collect::<Vec<_>>()
                    .delimited_by(just("("), just(")")),
            )
            .map(|components| AbiType::Tuple(TupleType::new(components)))
            .labelled("tuple type");

        choice((tuple, elementary_type_parser()))
            .then(array_suffix_parser().repeated().collect::<Vec<_>>())
            .map(|(base, suffixes)| {
                suffixes.into_iter().fold(base, |elem, suffix| match suffix {
                    Some(len) => AbiType::FixedArray(ArrayType::new(elem, len)),
                    None => AbiType::Array(Box::new(elem)),
                })
            })
            .labelled("type")
    })
}

fn run<'src, T>(
    parser: impl Parser<'src, &'src str, T, extra::Err<Rich<'src, char>>>,
    src: &'src str,
) -> AbiResult<T> {
    parser
        .padded()
        .then_ignore(end())
        .parse(src)
        .into_result()
        .map_err(|errors| AbiError::InvalidType {
            input: src.to_string(),
            reasons: errors.into_iter().map(|e| e.to_string()).collect(),
        })
}

/// Parse a single type signature.
///
/// ```rust
/// # use hyabi::types::{AbiType, parser::parse_type};
/// let ty = parse_type("(address to, uint256 amount)[]").unwrap();
/// assert!(ty.is_dynamic());
/// assert_eq!(ty.to_string(), "(address,uint256)[]");
/// ```
pub fn parse_type(src: &str) -> AbiResult<AbiType> {
    run(type_parser(), src)
}

/// Parse a parenthesized argument list into a [`TupleType`].
///
/// The outer parentheses are required; `()` is the empty argument list.
pub fn parse_tuple(src: &str) -> AbiResult<TupleType> {
    match parse_type(src)? {
        AbiType::Tuple(tuple) => Ok(tuple),
        other => Err(AbiError::InvalidType {
            input: src.to_string(),
            reasons: vec![format!("expected a tuple, found `{}`", other)],
        }),
    }
}

use super::span::{Parse, ParseResult, RawSpan};
use nom::{
    bytes::complete::{tag, take_while_m_n},
    combinator::{all_consuming, map_res},
};

/// A `YYYY-MM-DD` calendar date, not yet validated against the calendar
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ParsedDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

fn digits<'a>(n: usize) -> impl FnMut(RawSpan<'a>) -> ParseResult<'a, u32> {
    map_res(
        take_while_m_n(n, n, |c: char| c.is_ascii_digit()),
        |span: RawSpan<'a>| span.fragment().parse::<u32>(),
    )
}

impl<'a> Parse<'a> for ParsedDate {
    // NOTE: The year has at most 4 digits
    #[allow(clippy::cast_possible_wrap)]
    fn parse(input: RawSpan<'a>) -> ParseResult<'a, Self> {
        let (input, year) = digits(4)(input)?;
        let (input, _) = tag("-")(input)?;
        let (input, month) = digits(2)(input)?;
        let (input, _) = tag("-")(input)?;
        let (input, day) = digits(2)(input)?;

        Ok((
            input,
            Self {
                year: year as i32,
                month,
                day,
            },
        ))
    }
}

/// Parses a whole string as a date, rejecting trailing input.
///
/// On failure, returns the (1-based) column the parser stopped at.
pub fn parse_date(input: &str) -> Result<ParsedDate, usize> {
    match all_consuming(ParsedDate::parse)(RawSpan::new(input)) {
        Ok((_, date)) => Ok(date),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(e.input.get_utf8_column()),
        Err(nom::Err::Incomplete(_)) => Err(input.len() + 1),
    }
}

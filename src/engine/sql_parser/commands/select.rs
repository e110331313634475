//! Parses the analytic select shape: aggregates and plain columns over one
//! table, with optional group by / order by keys (names or 1-based ordinals)
//! and an optional row limit.

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    character::complete::digit1,
    combinator::{cut, opt, value},
    error::{make_error, ContextError, ErrorKind, ParseError},
    multi::separated_list1,
    sequence::{terminated, tuple},
    IResult,
};

use crate::engine::objects::{
    AggregateFunction, ParseTree, RawAggregate, RawKey, RawSelectCommand, RawSelectItem, SortType,
};

use super::super::common::{
    match_close_paren, match_column_name, match_comma, match_open_paren, maybe_take_whitespace,
    parse_sql_identifier, take_whitespace,
};

pub(in crate::engine::sql_parser) fn parse_select<
    'a,
    E: ParseError<&'a str> + ContextError<&'a str>,
>(
    input: &'a str,
) -> IResult<&'a str, ParseTree, E> {
    let (input, (_, (items, _, _, table, grouping, ordering, row_limit))) = tuple((
        match_select,
        cut(tuple((
            separated_list1(match_comma, parse_select_item),
            maybe_take_whitespace,
            match_from,
            parse_sql_identifier,
            opt(parse_group_by),
            opt(parse_order_by),
            opt(parse_limit),
        ))),
    ))(input)?;

    let raw_sel = RawSelectCommand {
        table: table.to_string(),
        items,
        grouping: grouping.unwrap_or_default(),
        ordering: ordering.unwrap_or_default(),
        row_limit,
    };

    Ok((input, ParseTree::Select(raw_sel)))
}

fn match_select<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, (), E> {
    let (input, (_, _)) = tuple((tag_no_case("select"), take_whitespace))(input)?;
    Ok((input, ()))
}

fn match_from<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, (), E> {
    let (input, (_, _)) = tuple((tag_no_case("from"), take_whitespace))(input)?;
    Ok((input, ()))
}

fn parse_select_item<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, RawSelectItem, E> {
    alt((parse_aggregate, parse_plain_column))(input)
}

fn parse_plain_column<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, RawSelectItem, E> {
    let (input, name) = match_column_name(input)?;
    Ok((input, RawSelectItem::Column(name)))
}

fn parse_aggregate<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, RawSelectItem, E> {
    //The open paren is the commit point, a bare column happens to share
    //its prefix with the function names
    let (input, (_, function, _, _, (column, distinct))) = tuple((
        maybe_take_whitespace,
        match_aggregate_function,
        maybe_take_whitespace,
        match_open_paren,
        cut(terminated(
            parse_aggregate_body,
            tuple((maybe_take_whitespace, match_close_paren, maybe_take_whitespace)),
        )),
    ))(input)?;

    Ok((
        input,
        RawSelectItem::Aggregate(RawAggregate {
            function,
            column,
            distinct,
        }),
    ))
}

fn match_aggregate_function<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, AggregateFunction, E> {
    alt((
        value(AggregateFunction::Count, tag_no_case("count")),
        value(AggregateFunction::Min, tag_no_case("min")),
        value(AggregateFunction::Max, tag_no_case("max")),
    ))(input)
}

fn parse_aggregate_body<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, (Option<String>, bool), E> {
    alt((parse_aggregate_star, parse_aggregate_column))(input)
}

fn parse_aggregate_star<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, (Option<String>, bool), E> {
    let (input, (_, _)) = tuple((maybe_take_whitespace, tag("*")))(input)?;
    Ok((input, (None, false)))
}

fn parse_aggregate_column<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, (Option<String>, bool), E> {
    let (input, (_, distinct, column)) = tuple((
        maybe_take_whitespace,
        opt(terminated(tag_no_case("distinct"), take_whitespace)),
        match_column_name,
    ))(input)?;
    Ok((input, (Some(column), distinct.is_some())))
}

fn parse_group_by<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Vec<RawKey>, E> {
    let (input, (_, _, _, _, keys)) = tuple((
        maybe_take_whitespace,
        tag_no_case("group"),
        take_whitespace,
        tag_no_case("by"),
        cut(separated_list1(match_comma, parse_key)),
    ))(input)?;
    Ok((input, keys))
}

fn parse_order_by<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Vec<(RawKey, SortType)>, E> {
    let (input, (_, _, _, _, keys)) = tuple((
        maybe_take_whitespace,
        tag_no_case("order"),
        take_whitespace,
        tag_no_case("by"),
        cut(separated_list1(match_comma, parse_order_item)),
    ))(input)?;
    Ok((input, keys))
}

fn parse_order_item<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, (RawKey, SortType), E> {
    let (input, (key, direction, _)) = tuple((
        parse_key,
        opt(alt((
            value(SortType::Descending, tag_no_case("desc")),
            value(SortType::Ascending, tag_no_case("asc")),
        ))),
        maybe_take_whitespace,
    ))(input)?;

    Ok((input, (key, direction.unwrap_or(SortType::Ascending))))
}

fn parse_key<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, RawKey, E> {
    let (input, token) = match_column_name(input)?;
    if token.chars().all(|c| c.is_ascii_digit()) {
        match token.parse::<usize>() {
            Ok(ordinal) => Ok((input, RawKey::Ordinal(ordinal))),
            Err(_) => Err(nom::Err::Failure(make_error(input, ErrorKind::Digit))),
        }
    } else {
        Ok((input, RawKey::Name(token)))
    }
}

fn parse_limit<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, usize, E> {
    let (input, (_, _, _, count, _)) = tuple((
        maybe_take_whitespace,
        tag_no_case("limit"),
        take_whitespace,
        digit1,
        maybe_take_whitespace,
    ))(input)?;

    match count.parse::<usize>() {
        Ok(count) => Ok((input, count)),
        Err(_) => Err(nom::Err::Failure(make_error(input, ErrorKind::Digit))),
    }
}

//! GraphQL scalar helpers.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// Helper for `#[graphql(with = ..)]` attribute of string scalars backed by a
/// validated domain type `As`.
///
/// Output is the [`Display`] of `As`, and input is parsed with its
/// [`FromStr`], so the domain validation rules apply to GraphQL inputs as is.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Outputs the target type as a GraphQL string.
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Parses the target type out of a GraphQL string input.
    ///
    /// # Errors
    ///
    /// If the input is not a string, or `As` rejects it.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr + Into<T>,
        As::Err: fmt::Display,
        T: GraphQLType<S, TypeInfo = ()>,
        S: ScalarValue,
    {
        let name = T::name(&()).unwrap_or("String");
        let s = input.as_string_value().ok_or_else(|| {
            format!("Expected `{name}` to be a string, found: {input}")
        })?;
        s.parse::<As>()
            .map(Into::into)
            .map_err(|e| format!("Invalid `{name}` \"{s}\": {e}"))
    }

    /// Parses the provided [`ScalarToken`] as a [`String`].
    ///
    /// # Errors
    ///
    /// If the token is not a string literal.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, InputValue};
    use service::domain;

    use crate::api::question::Text;

    use super::Via;

    fn parse(input: &InputValue<DefaultScalarValue>) -> Result<Text, String> {
        Via::<domain::question::Text>::from_input(input)
    }

    #[test]
    fn trims_valid_input() {
        let text = parse(&InputValue::scalar("  What is `Pin`? ")).unwrap();

        assert_eq!(text.to_string(), "What is `Pin`?");
    }

    #[test]
    fn rejects_blank_input() {
        let err = parse(&InputValue::scalar("   ")).unwrap_err();

        assert!(err.starts_with("Invalid `QuestionText`"), "{err}");
    }

    #[test]
    fn rejects_non_string_input() {
        let err = parse(&InputValue::scalar(42)).unwrap_err();

        assert!(err.starts_with("Expected `QuestionText`"), "{err}");
    }
}

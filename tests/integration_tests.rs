use chrono::NaiveDate;
use fieldtok::{
    parse, parse_row, Error, Field, LocalOpts, NullSentinels, Nullable, NumberFormat, Numeric,
    NumericKind, ParseOutcome, Quoted, StrTarget, StrView, Token, Value, ValueType,
};

fn last(inner: Token) -> Token {
    Token::Field(Field::new(inner).eoldelim(true))
}

#[test]
fn test_percentage_examples() {
    let token = Token::percentage();
    let out = token.try_parse_default("42.5%", 0, 5);
    assert_eq!(out, ParseOutcome::present(Value::Float(0.425), 5));
    assert!(!token.try_parse_default("42.5", 0, 4).is_present());
}

#[test]
fn test_quoted_field_examples() {
    let token = Token::field(Token::quoted(Token::string(StrTarget::Owned)));
    let text = "\"a,b\",next";
    let required = Token::Quoted(Quoted::new(Token::string(StrTarget::Owned)).required(true));
    let quoted = required.try_parse_default(text, 0, text.len());
    assert_eq!(quoted, ParseOutcome::present(Value::String("a,b".into()), 5));

    let out = token.try_parse_default(text, 0, text.len());
    assert_eq!(out, ParseOutcome::present(Value::String("a,b".into()), 6));

    let text = "\"a\"\"b\",";
    let out = token.try_parse_default(text, 0, text.len());
    assert_eq!(out.value, Some(Value::String("a\"b".into())));
}

#[test]
fn test_nullable_integer_examples() {
    let token = Token::nullable(Token::int());
    for text in ["", "NA", "NULL"] {
        let out = token.try_parse_default(text, 0, text.len());
        assert_eq!(out.value, Some(Value::Null), "{:?} should be null", text);
    }
    assert_eq!(
        token.try_parse_default("7", 0, 1),
        ParseOutcome::present(Value::Int(7), 1)
    );
}

#[test]
fn test_quoted_nullable_rows() {
    let columns = vec![
        Token::field(Token::quoted(Token::nullable(Token::int()))),
        last(Token::quoted(Token::nullable(Token::int()))),
    ];
    let text = "\"NA\",\"\"\n\"7\", 8\n";
    let opts = LocalOpts::default();

    let (row, pos) = parse_row(&columns, text, 0, &opts).unwrap();
    assert_eq!(row, vec![Value::Null, Value::Null]);
    assert_eq!(pos, 8);

    let (row, pos) = parse_row(&columns, text, pos, &opts).unwrap();
    assert_eq!(row, vec![Value::Int(7), Value::Int(8)]);
    assert_eq!(pos, text.len());
}

#[test]
fn test_crlf_is_one_terminator() {
    let token = last(Token::string(StrTarget::Slice));
    let text = "x\r\n";
    assert_eq!(
        token.try_parse_default(text, 0, text.len()),
        ParseOutcome::present(Value::Str("x"), 3)
    );
}

#[test]
fn test_end_of_buffer_needs_eoldelim() {
    let text = "x";
    assert!(!Token::field(Token::string(StrTarget::Slice))
        .try_parse_default(text, 0, 1)
        .is_present());
    assert!(last(Token::string(StrTarget::Slice))
        .try_parse_default(text, 0, 1)
        .is_present());
}

#[test]
fn test_mixed_csv_rows() {
    let columns = vec![
        Token::field(Token::uint()),
        Token::field(Token::quoted(Token::string(StrTarget::Slice))),
        Token::field(Token::nullable(Token::quoted(Token::float()))),
        last(Token::nullable(Token::date("%Y-%m-%d"))),
    ];
    let text = "1,\"Widget, large\",9.99,2024-01-15\r\n\
                2,Gadget, \"14.5\" ,NA\r\n\
                3,\"He said \"\"hi\"\"\",,\n";
    let opts = LocalOpts::default();

    let (row, pos) = parse_row(&columns, text, 0, &opts).unwrap();
    assert_eq!(
        row,
        vec![
            Value::UInt(1),
            Value::Str("Widget, large"),
            Value::Float(9.99),
            Value::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
        ]
    );

    let (row, pos) = parse_row(&columns, text, pos, &opts).unwrap();
    assert_eq!(
        row,
        vec![
            Value::UInt(2),
            Value::Str("Gadget"),
            Value::Float(14.5),
            Value::Null
        ]
    );

    let (row, pos) = parse_row(&columns, text, pos, &opts).unwrap();
    // borrowed slices keep the doubled quotes
    assert_eq!(
        row,
        vec![
            Value::UInt(3),
            Value::Str("He said \"\"hi\"\""),
            Value::Null,
            Value::Null
        ]
    );
    assert_eq!(pos, text.len());
}

#[test]
fn test_tsv_and_space_delimited_rows() {
    let columns = vec![Token::field(Token::int()), last(Token::int())];

    let tsv = LocalOpts::new().with_delimiter('\t');
    let (row, _) = parse_row(&columns, "1 \t 2\n", 0, &tsv).unwrap();
    assert_eq!(row, vec![Value::Int(1), Value::Int(2)]);

    let spaced = LocalOpts::new().with_spacedelim(true);
    let (row, pos) = parse_row(&columns, "  10    -20\n30 40", 0, &spaced).unwrap();
    assert_eq!(row, vec![Value::Int(10), Value::Int(-20)]);
    let (row, pos) = parse_row(&columns, "  10    -20\n30 40", pos, &spaced).unwrap();
    assert_eq!(row, vec![Value::Int(30), Value::Int(40)]);
    assert_eq!(pos, 17);
}

#[test]
fn test_semicolon_dialect_with_decimal_comma() {
    let fmt = NumberFormat::new().with_decimal(',').with_thousands('.');
    let columns = vec![
        Token::field(Token::Numeric(Numeric::new(NumericKind::Int).with_format(fmt))),
        Token::field(Token::float_with_format(fmt)),
        last(Token::percentage_with_format(fmt)),
    ];
    let opts = LocalOpts::new().with_delimiter(';');
    let (row, _) = parse_row(&columns, "1.250;3,5;12,5 %\n", 0, &opts).unwrap();
    assert_eq!(
        row,
        vec![Value::Int(1250), Value::Float(3.5), Value::Float(0.125)]
    );
}

#[test]
fn test_escape_char_dialect() {
    let opts = LocalOpts::new().with_quote('\'').with_escape('\\');
    let token = Token::field(Token::quoted(Token::string(StrTarget::Owned)));
    let text = r"'it\'s, fine',x";
    let out = token.try_parse(text, 0, text.len(), &opts);
    assert_eq!(out.value, Some(Value::String("it's, fine".into())));
    assert_eq!(out.pos, 14);
}

#[test]
fn test_zero_copy_view_points_into_buffer() {
    let token = Token::field(Token::quoted(Token::string(StrTarget::View)));
    let text = "  \"quoted text\" ,rest";
    let out = token.try_parse_default(text, 0, text.len());
    let Some(Value::View(view)) = out.value else {
        panic!("Expected view, got {:?}", out.value);
    };
    assert_eq!(view, StrView::new(3, 11));
    assert_eq!(view.resolve(text), Some("quoted text"));
    assert_eq!(out.pos, 17);
}

#[test]
fn test_unknown_columns_during_inference() {
    let guess = Token::field(Token::nullable(Token::Unknown));
    assert_eq!(guess.value_type(), ValueType::Missing);

    let text = "NA,,abc,";
    let out = guess.try_parse_default(text, 0, text.len());
    assert_eq!(out, ParseOutcome::present(Value::Null, 3));
    let out = guess.try_parse_default(text, 3, text.len());
    assert_eq!(out, ParseOutcome::present(Value::Null, 4));
    // real content means the column is not all-missing
    assert!(!guess.try_parse_default(text, 4, text.len()).is_present());
}

#[test]
fn test_options_override_for_single_column() {
    let piped = LocalOpts::new().with_delimiter('|');
    let columns = vec![
        Token::with_options(Token::field(Token::string(StrTarget::Slice)), piped),
        last(Token::int()),
    ];
    let (row, _) = parse_row(&columns, "a,b|5\n", 0, &LocalOpts::default()).unwrap();
    assert_eq!(row, vec![Value::Str("a,b"), Value::Int(5)]);
}

#[test]
fn test_custom_sentinels_in_row() {
    let dash = NullSentinels::new(["-"]);
    let columns = vec![
        Token::field(Token::Nullable(
            Nullable::new(Token::int()).with_sentinels(dash.clone()),
        )),
        last(Token::Nullable(Nullable::new(Token::int()).with_sentinels(dash))),
    ];
    let (row, _) = parse_row(&columns, "-,4\n", 0, &LocalOpts::default()).unwrap();
    assert_eq!(row, vec![Value::Null, Value::Int(4)]);
    assert!(parse_row(&columns, "NA,4\n", 0, &LocalOpts::default()).is_err());
}

#[test]
fn test_typed_extraction() {
    let token = Token::nullable(Token::percentage());
    let value: Option<f64> = parse(&token, "50%").unwrap();
    assert_eq!(value, Some(0.5));
    let value: Option<f64> = parse(&token, "n/a").unwrap();
    assert_eq!(value, None);

    let date: NaiveDate = parse(&Token::for_type(&ValueType::Date), "1999-12-31").unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(1999, 12, 31).unwrap());
}

#[test]
fn test_error_points_at_failure() {
    let columns = vec![Token::field(Token::int()), last(Token::float())];
    let text = "1,2.0\n3,abc\n";
    let (_, pos) = parse_row(&columns, text, 0, &LocalOpts::default()).unwrap();
    let err = parse_row(&columns, text, pos, &LocalOpts::default()).unwrap_err();
    match err {
        Error::Parse {
            line,
            col,
            context,
            ..
        } => {
            assert_eq!((line, col), (2, 3));
            assert_eq!(context, "3,abc");
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_unexpected_eof() {
    let columns = vec![Token::field(Token::int()), last(Token::int())];
    let err = parse_row(&columns, "1,", 0, &LocalOpts::default()).unwrap_err();
    assert!(matches!(err, Error::UnexpectedEof { .. }));
}

#[test]
fn test_options_from_json_config() {
    let opts: LocalOpts =
        serde_json::from_str(r#"{"endchar": "\t", "quotechar": "'", "escapechar": "\\"}"#)
            .unwrap();
    assert_eq!(
        opts,
        LocalOpts::new()
            .with_delimiter('\t')
            .with_quote('\'')
            .with_escape('\\')
    );
    let json = serde_json::to_string(&LocalOpts::default()).unwrap();
    assert!(json.contains(r#""endchar":",""#));
}

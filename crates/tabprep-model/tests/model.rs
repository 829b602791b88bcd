use std::collections::BTreeMap;
use std::io::Write;

use tabprep_model::{Cell, ModelError, NumericFill, PreprocessOptions, Recipe, Step};

#[test]
fn numeric_fill_parses_known_names() {
    assert_eq!("mean".parse::<NumericFill>().unwrap(), NumericFill::Mean);
    assert_eq!(" Freq ".parse::<NumericFill>().unwrap(), NumericFill::Freq);
    assert_eq!("em".parse::<NumericFill>().unwrap(), NumericFill::Em);
    assert!(!NumericFill::Predict.is_implemented());
    assert!(NumericFill::None.is_implemented());
}

#[test]
fn numeric_fill_rejects_unknown_names() {
    let err = "median".parse::<NumericFill>().unwrap_err();
    assert!(matches!(err, ModelError::UnknownPolicy { ref name } if name == "median"));
    assert_eq!(err.to_string(), "unknown missing-value policy 'median'");
}

#[test]
fn preprocess_defaults_match_documented_values() {
    let options = PreprocessOptions::default();
    assert_eq!(options.numeric_fill, NumericFill::Mean);
    assert_eq!(options.text_fill, " ");
    assert!(!options.scale);
    assert!(!options.normalize);
    assert!(options.seed.is_none());
}

#[test]
fn recipe_parses_tagged_steps() {
    let json = r#"{
        "read": { "drop_fields": ["Id"] },
        "steps": [
            { "op": "preprocess", "numeric_fill": "freq", "text_fill": "" },
            { "op": "str_to_num", "column": "sex", "mapping": { "M": 1, "F": 2 } },
            { "op": "str_to_num_all" },
            { "op": "remove_duplicates" },
            { "op": "sample", "n": 3, "seed": 7 },
            { "op": "add_column", "title": "w", "values": [1, 2.5, "x", null, true] }
        ]
    }"#;
    let recipe: Recipe = serde_json::from_str(json).unwrap();

    assert_eq!(recipe.read.drop_fields, vec!["Id".to_string()]);
    assert!(!recipe.read.replace_strings);
    assert_eq!(recipe.steps.len(), 6);
    assert_eq!(
        recipe.steps[0],
        Step::Preprocess(
            PreprocessOptions::default()
                .with_numeric_fill(NumericFill::Freq)
                .with_text_fill("")
        )
    );
    let mut mapping = BTreeMap::new();
    mapping.insert("F".to_string(), 2.0);
    mapping.insert("M".to_string(), 1.0);
    assert_eq!(
        recipe.steps[1],
        Step::StrToNum {
            column: "sex".to_string(),
            mapping
        }
    );
    assert_eq!(recipe.steps[2], Step::StrToNumAll { except: Vec::new() });
    assert_eq!(recipe.steps[4], Step::Sample { n: 3, seed: Some(7) });
    assert_eq!(
        recipe.steps[5],
        Step::AddColumn {
            title: "w".to_string(),
            values: vec![
                Cell::Int(1),
                Cell::Float(2.5),
                Cell::Text("x".to_string()),
                Cell::Missing,
                Cell::Bool(true),
            ],
        }
    );
}

#[test]
fn recipe_rejects_fractional_sample_size() {
    let json = r#"{ "steps": [ { "op": "sample", "n": 1.5 } ] }"#;
    assert!(serde_json::from_str::<Recipe>(json).is_err());
}

#[test]
fn recipe_load_reports_path_on_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();

    let err = Recipe::load(file.path()).unwrap_err();
    assert!(matches!(err, ModelError::RecipeParse { .. }));
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn recipe_load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "steps": [ {{ "op": "scale" }} ] }}"#).unwrap();

    let recipe = Recipe::load(file.path()).unwrap();
    assert_eq!(recipe.steps, vec![Step::Scale]);
    assert_eq!(recipe.steps[0].name(), "scale");
}

#[test]
fn default_seed_only_fills_unseeded_steps() {
    let recipe = Recipe::default()
        .with_step(Step::Preprocess(PreprocessOptions::default()))
        .with_step(Step::Sample { n: 2, seed: Some(5) })
        .with_step(Step::Sample { n: 2, seed: None })
        .with_default_seed(42);

    assert_eq!(
        recipe.steps[0],
        Step::Preprocess(PreprocessOptions::default().with_seed(42))
    );
    assert_eq!(recipe.steps[1], Step::Sample { n: 2, seed: Some(5) });
    assert_eq!(recipe.steps[2], Step::Sample { n: 2, seed: Some(42) });
}

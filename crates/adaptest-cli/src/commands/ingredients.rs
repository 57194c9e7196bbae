use super::load_config_or_exit;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct IngredientRow {
    kind: &'static str,
    value: String,
}

pub fn run(config_path: String, json_output: bool) {
    let config = load_config_or_exit(&config_path);
    let rows: Vec<IngredientRow> = config
        .ingredients()
        .iter()
        .map(|ingredient| IngredientRow {
            kind: ingredient.kind(),
            value: ingredient.describe(),
        })
        .collect();

    if json_output {
        let rendered = serde_json::to_string_pretty(&rows).unwrap_or_else(|err| {
            eprintln!("error: failed to render ingredients payload: {err}");
            std::process::exit(2);
        });
        println!("{rendered}");
    } else {
        println!("adaptest ingredients");
        println!("  Config: {config_path}");
        println!("  Count: {}", rows.len());
        for row in &rows {
            println!("  - {}: {}", row.kind, row.value);
        }
    }
}

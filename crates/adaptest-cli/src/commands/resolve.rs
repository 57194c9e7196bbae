use super::load_config_or_exit;
use adaptest_rules::RulesSummary;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveOutput {
    config_path: String,
    #[serde(flatten)]
    summary: RulesSummary,
    fingerprint: String,
}

pub fn run(config_path: String, json_output: bool) {
    let config = load_config_or_exit(&config_path);
    let rules = config.resolve().unwrap_or_else(|err| {
        eprintln!("error: {err}");
        std::process::exit(1);
    });

    let summary = rules.summary();
    let output = ResolveOutput {
        fingerprint: summary.fingerprint(),
        config_path,
        summary,
    };

    if json_output {
        let rendered = serde_json::to_string_pretty(&output).unwrap_or_else(|err| {
            eprintln!("error: failed to render resolve payload: {err}");
            std::process::exit(2);
        });
        println!("{rendered}");
    } else {
        println!("adaptest resolve");
        println!("  Config: {}", output.config_path);
        println!("  Ability estimator: {}", output.summary.ability_estimator);
        if output.summary.ability_trackers.is_empty() {
            println!("  Ability trackers: (none)");
        } else {
            println!(
                "  Ability trackers: {}",
                output.summary.ability_trackers.join(" -> ")
            );
        }
        println!("  Next-item rule: {}", output.summary.next_item_rule);
        println!(
            "  Termination condition: {}",
            output.summary.termination_condition
        );
        println!("  Fingerprint: {}", output.fingerprint);
    }
}

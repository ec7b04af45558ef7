//! Implementation of the `plan` command.

use crate::cli::PlanArgs;
use crate::config::Config;
use crate::env::Environment;
use crate::error::{Result, ShimError};
use crate::invocation::ImportPlan;

/// Execute the `plan` command.
pub fn cmd_plan(args: PlanArgs, config: &Config) -> Result<()> {
    let env = Environment::capture();
    let plan = ImportPlan::resolve(config, &env);

    if args.json {
        let json = serde_json::to_string_pretty(&plan)
            .map_err(|e| ShimError::UserError(format!("failed to serialize plan: {}", e)))?;
        println!("{}", json);
    } else {
        print!("{}", render_plan(&plan, config, &env));
    }
    Ok(())
}

fn render_plan(plan: &ImportPlan, config: &Config, env: &Environment) -> String {
    let root_source = if env.get(&plan.root_dir_var).is_some_and(|v| !v.is_empty()) {
        format!("from {}", plan.root_dir_var)
    } else {
        format!("{} unset", plan.root_dir_var)
    };

    let args = if plan.args.is_empty() {
        "(none)".to_string()
    } else {
        plan.args.join(" ")
    };

    let credentials = if !config.decrypt_credentials {
        "(decryption disabled)".to_string()
    } else if plan.credential_targets.is_empty() {
        "(none configured)".to_string()
    } else {
        plan.credential_targets.join(", ")
    };

    let mut out = String::new();
    out.push_str(&format!("Binary:      {}\n", plan.binary.display()));
    out.push_str(&format!("Root:        {} ({})\n", plan.root_dir, root_source));
    out.push_str(&format!("Arguments:   {}\n", args));
    out.push_str(&format!("Credentials: {}\n", credentials));
    out
}

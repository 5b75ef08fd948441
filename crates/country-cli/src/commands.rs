use std::sync::Arc;

use anyhow::{Context, Result};
use country_cli::render::{codes_json, codes_table, standards_table};
use country_map::{ConverterConfig, CountryCodeConverter, MappingSource};
use country_model::{StandardInfo, StandardKey};
use country_standards::StandardRegistry;
use tracing::debug;

use crate::cli::{ConvertArgs, StandardsArgs, TableArgs};

pub fn run_convert(args: &ConvertArgs) -> Result<()> {
    let registry = StandardRegistry::builtin().context("load standards")?;
    let converter = build_converter(&args.table, &registry)?;
    let from = resolve_standard(&converter, args.from.as_ref())?;
    let to = resolve_standard(&converter, args.to.as_ref())?;

    let value = args.value.trim();
    debug!(value = %value, from = %from, to = %to, "converting");
    let codes = converter.convert(value, &from, &to)?;

    if args.json {
        println!("{}", codes_json(&codes).context("serialize matches")?);
    } else if codes.is_empty() {
        println!("No {to} code corresponds to {from} value \"{value}\".");
    } else {
        println!("{}", codes_table(&codes));
    }
    Ok(())
}

pub fn run_standards(args: &StandardsArgs) -> Result<()> {
    let registry = StandardRegistry::builtin().context("load standards")?;
    let converter = build_converter(&args.table, &registry)?;

    let table = standards_table(
        &converter.supported_standards(),
        converter.index().bindings(),
        converter.default_standard(),
    );
    println!("{table}");
    print!("{}", converter.report());
    Ok(())
}

fn build_converter(args: &TableArgs, registry: &StandardRegistry) -> Result<CountryCodeConverter> {
    let mut config = ConverterConfig::from_env();
    if let Some(path) = &args.mappings {
        config = config.with_mappings(MappingSource::File(path.clone()));
    }
    if args.lenient {
        config = config.lenient();
    }
    let name = config.mappings.name().into_owned();
    CountryCodeConverter::from_config(&config, registry)
        .with_context(|| format!("load mapping table {name}"))
}

fn resolve_standard(
    converter: &CountryCodeConverter,
    key: Option<&StandardKey>,
) -> Result<Arc<StandardInfo>> {
    match key {
        Some(key) => Ok(converter.standard(key)?),
        None => Ok(Arc::clone(converter.default_standard())),
    }
}

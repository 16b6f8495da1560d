//! Human-readable tables and substance reports.

use socalc_core::catalog::Catalog;
use socalc_core::substance::Substance;
use socalc_core::valuation::evaluate;
use std::io::{self, Write};

/// Wrap width for the effect and recipe lines.
const MAX_LINE_LEN: usize = 80;

fn divider(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "+ -----------")
}

/// Write `items` after a `| ` prefix, joined by `sep`, starting a new
/// prefixed line whenever the next item would pass `MAX_LINE_LEN`.
fn wrapped(out: &mut impl Write, items: &[String], sep: &str, tail: &str) -> io::Result<()> {
    write!(out, "| ")?;
    let mut len = 0;
    for item in items {
        if len > 0 && len + sep.len() + item.len() > MAX_LINE_LEN {
            write!(out, "\n| ")?;
            len = 0;
        } else if len > 0 {
            write!(out, "{sep}")?;
            len += sep.len();
        }
        write!(out, "{item}")?;
        len += item.len();
    }
    writeln!(out, "{tail}")
}

/// Full report for one substance state.
pub fn substance(out: &mut impl Write, catalog: &Catalog, state: &Substance) -> io::Result<()> {
    let name = catalog
        .substance(state.id)
        .map_or("?", |def| def.name.as_str());
    let valuation = evaluate(catalog, state);

    divider(out)?;
    writeln!(out, "| Drug Info:")?;
    divider(out)?;
    writeln!(out, "| Name:       {name}")?;
    writeln!(out, "| Base value: ${}", state.base_value)?;
    divider(out)?;

    writeln!(out, "| Effects:")?;
    let effects: Vec<String> = state
        .effects
        .iter()
        .filter_map(|id| catalog.effect(id))
        .map(|def| format!("[{} {}]", def.name, def.multiplier))
        .collect();
    wrapped(out, &effects, " ", "")?;
    writeln!(out, "| Multiplier: {}", valuation.multiplier)?;
    writeln!(out, "| Final value: ${}", valuation.value)?;
    divider(out)?;

    writeln!(out, "| Cost: ${}", state.cost)?;
    writeln!(out, "| Profit: ${}", valuation.profit)?;
    if !state.history.is_empty() {
        writeln!(out, "| Recipe:")?;
        let steps: Vec<String> = state
            .history
            .iter()
            .filter_map(|&id| catalog.mixin(id))
            .map(|def| format!("[{} ${}] -> ", def.name, def.cost))
            .collect();
        wrapped(out, &steps, "", "Done!")?;
    }
    divider(out)
}

pub fn list_substances(out: &mut impl Write, catalog: &Catalog) -> io::Result<()> {
    let rule = "+ ---- + ----------------- + ------ +";
    writeln!(out, "{rule}")?;
    writeln!(out, "| ids: | names:            | value: |")?;
    writeln!(out, "{rule}")?;
    for (id, def) in catalog.substances() {
        let value = format!("${}", def.value);
        writeln!(out, "| {:<4} | {:<17} | {:<6} |", id.0, def.name, value)?;
    }
    writeln!(out, "{rule}")
}

pub fn list_effects(out: &mut impl Write, catalog: &Catalog) -> io::Result<()> {
    let rule = "+ ---- + ----------------- + ------------ +";
    writeln!(out, "{rule}")?;
    writeln!(out, "| ids: | names:            | multipliers: |")?;
    writeln!(out, "{rule}")?;
    for (id, def) in catalog.effects() {
        let multiplier = def.multiplier.to_string();
        writeln!(out, "| {:<4} | {:<17} | {:<12} |", id.0, def.name, multiplier)?;
    }
    writeln!(out, "{rule}")
}

pub fn list_mixins(out: &mut impl Write, catalog: &Catalog) -> io::Result<()> {
    let rule = "+ ---- + -------------- + ------ +";
    writeln!(out, "{rule}")?;
    writeln!(out, "| ids: | names:         | costs: |")?;
    writeln!(out, "{rule}")?;
    for (id, def) in catalog.mixins() {
        let cost = format!("${}", def.cost);
        writeln!(out, "| {:<4} | {:<14} | {:<6} |", id.0, def.name, cost)?;
    }
    writeln!(out, "{rule}")
}

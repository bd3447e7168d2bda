//! Effects implemented in code.
//!
//! These handlers look skills and attributes up by name at collection time, so
//! they work against any static data set that uses the game's names.

use dogma_core::{
    Domain, EffectCategory, EffectContext, EffectDefinition, EffectId, EffectRegistry, Filter,
    Fit, Item, RegistryError, ValueExpr,
};
use tracing::warn;

pub const ONLINE: EffectId = EffectId(16);
pub const SUBSYSTEM_SKIRMISH_WARFARE: EffectId = EffectId(6581);
pub const COMMAND_BURST_SPECIALIST: EffectId = EffectId(6582);

const GALLENTE_DEFENSIVE_SYSTEMS: &str = "Gallente Defensive Systems";
const SKIRMISH_WARFARE_SPECIALIST: &str = "Skirmish Warfare Specialist";
const COMMAND_BONUS: &str = "commandBonus";
const SUBSYSTEM_BONUS: &str = "subsystemBonusGallenteDefensive";
const SPECIALIST_BONUS: &str = "commandStrengthBonus";

/// Every code-defined effect.
pub fn builtin_effects() -> Vec<EffectDefinition> {
    vec![
        // marker effect: makes a type require the online state
        EffectDefinition::declarative(ONLINE, "online", EffectCategory::Online, Vec::new()),
        EffectDefinition::custom(
            SUBSYSTEM_SKIRMISH_WARFARE,
            "subsystemBonusGallenteDefensiveSkirmishWarfare",
            EffectCategory::Passive,
            skirmish_warfare_subsystem,
        ),
        EffectDefinition::custom(
            COMMAND_BURST_SPECIALIST,
            "skirmishWarfareSpecialistCommandBonus",
            EffectCategory::Passive,
            command_burst_specialist,
        ),
    ]
}

/// Registers [`builtin_effects`] into `registry`.
pub fn register_builtins(registry: &mut EffectRegistry) -> Result<(), RegistryError> {
    for definition in builtin_effects() {
        registry.register(definition)?;
    }
    Ok(())
}

fn missing(ctx: &EffectContext<'_>, name: &str) {
    warn!(
        target: "dogma::content",
        effect = %ctx.effect(),
        name,
        "builtin effect references unknown static data"
    );
}

/// Strategic cruiser warfare processor: boosts the strength of skirmish
/// command bursts by a per-level bonus of the defensive subsystem skill.
fn skirmish_warfare_subsystem(_fit: &Fit, _item: &Item, ctx: &mut EffectContext<'_>) {
    let Some(skill) = ctx.type_named(GALLENTE_DEFENSIVE_SYSTEMS) else {
        return missing(ctx, GALLENTE_DEFENSIVE_SYSTEMS);
    };
    let Some(specialist) = ctx.type_named(SKIRMISH_WARFARE_SPECIALIST) else {
        return missing(ctx, SKIRMISH_WARFARE_SPECIALIST);
    };
    let Some(bonus) = ctx.attribute_named(SUBSYSTEM_BONUS) else {
        return missing(ctx, SUBSYSTEM_BONUS);
    };
    let Some(command_bonus) = ctx.attribute_named(COMMAND_BONUS) else {
        return missing(ctx, COMMAND_BONUS);
    };

    ctx.filtered_item_boost(
        Domain::Modules,
        Filter::requires_skill(specialist),
        command_bonus,
        ValueExpr::own_attr(bonus) * ValueExpr::skill_level(skill),
    );
}

/// The specialist skill itself: each trained level strengthens every burst
/// requiring it.
fn command_burst_specialist(_fit: &Fit, item: &Item, ctx: &mut EffectContext<'_>) {
    let Some(command_bonus) = ctx.attribute_named(COMMAND_BONUS) else {
        return missing(ctx, COMMAND_BONUS);
    };
    let Some(bonus) = ctx.attribute_named(SPECIALIST_BONUS) else {
        return missing(ctx, SPECIALIST_BONUS);
    };

    ctx.filtered_item_boost(
        Domain::Modules,
        Filter::requires_skill(item.type_id),
        command_bonus,
        ValueExpr::own_attr(bonus) * ValueExpr::skill_level(item.type_id),
    );
}

//! Shared static data for the integration tests: a strategic cruiser with a
//! warfare subsystem, command bursts, turrets and damage modules.
#![allow(dead_code)]

use dogma_core::{
    AttributeDefinition, AttributeId, CategoryDefinition, CategoryId, Domain, DogmaEnv,
    EffectCategory, EffectContext, EffectDefinition, EffectId, EffectRegistry, Filter, Fit,
    GroupDefinition, GroupId, Item, ItemRef, ModifierTemplate, Operation, Slot, StaticSnapshot,
    Target, TypeDefinition, TypeId, ValueExpr,
};

// categories
pub const SHIP: CategoryId = CategoryId(6);
pub const MODULE: CategoryId = CategoryId(7);
pub const SKILL: CategoryId = CategoryId(16);
pub const SUBSYSTEM: CategoryId = CategoryId(32);
pub const CHARGE: CategoryId = CategoryId(8);

// groups
pub const STRATEGIC_CRUISER: GroupId = GroupId(963);
pub const COMMAND_BURST: GroupId = GroupId(1770);
pub const HYBRID_WEAPON: GroupId = GroupId(74);
pub const MAGNETIC_STABILIZER: GroupId = GroupId(302);
pub const DEFENSIVE_SUBSYSTEM: GroupId = GroupId(954);
pub const SKILL_GROUP: GroupId = GroupId(255);
pub const HYBRID_CHARGE: GroupId = GroupId(85);

// attributes
pub const COMMAND_BONUS: AttributeId = AttributeId(2468);
pub const SUBSYSTEM_BONUS: AttributeId = AttributeId(1507);
pub const DAMAGE_MULTIPLIER: AttributeId = AttributeId(64);
pub const DAMAGE_BONUS: AttributeId = AttributeId(292);
pub const MAX_VELOCITY: AttributeId = AttributeId(37);
pub const POWER_OUTPUT: AttributeId = AttributeId(11);
pub const SIGNATURE: AttributeId = AttributeId(552);
pub const CYCLE_A: AttributeId = AttributeId(9001);
pub const CYCLE_B: AttributeId = AttributeId(9002);

// types
pub const PROTEUS: TypeId = TypeId(29988);
pub const WARFARE_PROCESSOR: TypeId = TypeId(45598);
pub const SKIRMISH_BURST: TypeId = TypeId(42529);
pub const SHIELD_BURST: TypeId = TypeId(42530);
pub const RAILGUN: TypeId = TypeId(3170);
pub const MAGSTAB_I: TypeId = TypeId(9944);
pub const MAGSTAB_II: TypeId = TypeId(10190);
pub const LOOPED_HULL: TypeId = TypeId(90000);
pub const BROKEN_MODULE: TypeId = TypeId(90001);
pub const ANTIMATTER: TypeId = TypeId(230);

// skills
pub const GALLENTE_DEFENSIVE: TypeId = TypeId(30540);
pub const SKIRMISH_SPECIALIST: TypeId = TypeId(3349);
pub const SURGICAL_STRIKE: TypeId = TypeId(3315);
pub const GUNNERY: TypeId = TypeId(3300);

// effects
pub const SKIRMISH_SUBSYSTEM_BONUS: EffectId = EffectId(4001);
pub const MAGSTAB_BONUS: EffectId = EffectId(4002);
pub const SURGICAL_STRIKE_BONUS: EffectId = EffectId(4003);
pub const MUTUAL_BOOST: EffectId = EffectId(4004);
pub const AMMO_DAMAGE: EffectId = EffectId(4005);
pub const ONLINE: EffectId = EffectId(16);
pub const MISSING_EFFECT: EffectId = EffectId(9999);

pub fn snapshot() -> StaticSnapshot {
    StaticSnapshot::default()
        .with_category(CategoryDefinition::new(SHIP, "Ship"))
        .with_category(CategoryDefinition::new(MODULE, "Module"))
        .with_category(CategoryDefinition::new(SKILL, "Skill"))
        .with_category(CategoryDefinition::new(SUBSYSTEM, "Subsystem"))
        .with_category(CategoryDefinition::new(CHARGE, "Charge"))
        .with_group(GroupDefinition::new(STRATEGIC_CRUISER, "Strategic Cruiser", SHIP))
        .with_group(GroupDefinition::new(COMMAND_BURST, "Command Burst", MODULE))
        .with_group(GroupDefinition::new(HYBRID_WEAPON, "Hybrid Weapon", MODULE))
        .with_group(GroupDefinition::new(MAGNETIC_STABILIZER, "Magnetic Field Stabilizer", MODULE))
        .with_group(GroupDefinition::new(DEFENSIVE_SUBSYSTEM, "Defensive Systems", SUBSYSTEM))
        .with_group(GroupDefinition::new(SKILL_GROUP, "Gunnery", SKILL))
        .with_group(GroupDefinition::new(HYBRID_CHARGE, "Hybrid Charge", CHARGE))
        .with_attribute(AttributeDefinition::new(COMMAND_BONUS, "commandBonus"))
        .with_attribute(AttributeDefinition::new(
            SUBSYSTEM_BONUS,
            "subsystemBonusGallenteDefensive",
        ))
        .with_attribute(
            AttributeDefinition::new(DAMAGE_MULTIPLIER, "damageMultiplier").with_default(1.0),
        )
        .with_attribute(AttributeDefinition::new(DAMAGE_BONUS, "damageMultiplierBonus"))
        .with_attribute(AttributeDefinition::new(MAX_VELOCITY, "maxVelocity"))
        .with_attribute(AttributeDefinition::new(POWER_OUTPUT, "powerOutput"))
        .with_attribute(AttributeDefinition::new(SIGNATURE, "signatureRadius").with_default(125.0))
        .with_attribute(AttributeDefinition::new(CYCLE_A, "cycleA"))
        .with_attribute(AttributeDefinition::new(CYCLE_B, "cycleB"))
        .with_type(
            TypeDefinition::new(PROTEUS, "Proteus", STRATEGIC_CRUISER)
                .with_attribute(MAX_VELOCITY, 150.0)
                .with_attribute(POWER_OUTPUT, 900.0),
        )
        .with_type(
            TypeDefinition::new(LOOPED_HULL, "Looped Hull", STRATEGIC_CRUISER)
                .with_attribute(CYCLE_A, 1.0)
                .with_attribute(CYCLE_B, 2.0)
                .with_effect(MUTUAL_BOOST),
        )
        .with_type(
            TypeDefinition::new(
                WARFARE_PROCESSOR,
                "Proteus Defensive - Warfare Processor",
                DEFENSIVE_SUBSYSTEM,
            )
            .with_attribute(SUBSYSTEM_BONUS, 5.0)
            .with_effect(SKIRMISH_SUBSYSTEM_BONUS)
            .with_required_skill(GALLENTE_DEFENSIVE, 1)
            .with_slot(Slot::Subsystem),
        )
        .with_type(
            TypeDefinition::new(SKIRMISH_BURST, "Skirmish Command Burst I", COMMAND_BURST)
                .with_attribute(COMMAND_BONUS, 10.0)
                .with_effect(ONLINE)
                .with_required_skill(SKIRMISH_SPECIALIST, 1)
                .with_slot(Slot::High),
        )
        .with_type(
            TypeDefinition::new(SHIELD_BURST, "Shield Command Burst I", COMMAND_BURST)
                .with_attribute(COMMAND_BONUS, 10.0)
                .with_effect(ONLINE)
                .with_slot(Slot::High),
        )
        .with_type(
            TypeDefinition::new(RAILGUN, "125mm Railgun I", HYBRID_WEAPON)
                .with_attribute(DAMAGE_MULTIPLIER, 2.0)
                .with_effect(ONLINE)
                .with_required_skill(GUNNERY, 1)
                .with_slot(Slot::High),
        )
        .with_type(
            TypeDefinition::new(MAGSTAB_I, "Magnetic Field Stabilizer I", MAGNETIC_STABILIZER)
                .with_attribute(DAMAGE_BONUS, 1.07)
                .with_effect(ONLINE)
                .with_effect(MAGSTAB_BONUS)
                .with_slot(Slot::Low),
        )
        .with_type(
            TypeDefinition::new(MAGSTAB_II, "Magnetic Field Stabilizer II", MAGNETIC_STABILIZER)
                .with_attribute(DAMAGE_BONUS, 1.1)
                .with_effect(ONLINE)
                .with_effect(MAGSTAB_BONUS)
                .with_slot(Slot::Low),
        )
        .with_type(
            TypeDefinition::new(BROKEN_MODULE, "Broken Module", HYBRID_WEAPON)
                .with_effect(MISSING_EFFECT),
        )
        .with_type(
            TypeDefinition::new(ANTIMATTER, "Antimatter Charge S", HYBRID_CHARGE)
                .with_attribute(DAMAGE_BONUS, 1.5)
                .with_effect(AMMO_DAMAGE),
        )
        .with_type(TypeDefinition::new(
            GALLENTE_DEFENSIVE,
            "Gallente Defensive Systems",
            SKILL_GROUP,
        ))
        .with_type(TypeDefinition::new(
            SKIRMISH_SPECIALIST,
            "Skirmish Warfare Specialist",
            SKILL_GROUP,
        ))
        .with_type(
            TypeDefinition::new(SURGICAL_STRIKE, "Surgical Strike", SKILL_GROUP)
                .with_attribute(DAMAGE_BONUS, 3.0)
                .with_effect(SURGICAL_STRIKE_BONUS),
        )
        .with_type(TypeDefinition::new(GUNNERY, "Gunnery", SKILL_GROUP))
}

fn skirmish_subsystem_bonus(_fit: &Fit, _item: &Item, ctx: &mut EffectContext<'_>) {
    ctx.filtered_item_boost(
        Domain::Modules,
        Filter::requires_skill(SKIRMISH_SPECIALIST),
        COMMAND_BONUS,
        ValueExpr::own_attr(SUBSYSTEM_BONUS) * ValueExpr::skill_level(GALLENTE_DEFENSIVE),
    );
}

pub fn registry() -> EffectRegistry {
    let mut registry = EffectRegistry::new();
    let definitions = [
        EffectDefinition::declarative(ONLINE, "online", EffectCategory::Online, Vec::new()),
        EffectDefinition::custom(
            SKIRMISH_SUBSYSTEM_BONUS,
            "subsystemBonusGallenteDefensiveSkirmishWarfare",
            EffectCategory::Passive,
            skirmish_subsystem_bonus,
        ),
        EffectDefinition::declarative(
            MAGSTAB_BONUS,
            "hybridWeaponDamageMultiply",
            EffectCategory::Online,
            vec![
                ModifierTemplate::new(
                    Target::Filtered {
                        domain: Domain::Modules,
                        filter: Filter::Group(HYBRID_WEAPON),
                    },
                    DAMAGE_MULTIPLIER,
                    Operation::PostMul,
                    ValueExpr::own_attr(DAMAGE_BONUS),
                )
                .penalized(),
            ],
        ),
        EffectDefinition::declarative(
            SURGICAL_STRIKE_BONUS,
            "surgicalStrikeDamageMultiplierBonus",
            EffectCategory::Passive,
            vec![ModifierTemplate::new(
                Target::Filtered {
                    domain: Domain::Modules,
                    filter: Filter::requires_skill(GUNNERY),
                },
                DAMAGE_MULTIPLIER,
                Operation::PostPercent,
                ValueExpr::own_attr(DAMAGE_BONUS) * ValueExpr::skill_level(SURGICAL_STRIKE),
            )],
        ),
        EffectDefinition::declarative(
            AMMO_DAMAGE,
            "ammoInfluenceDamage",
            EffectCategory::Online,
            vec![ModifierTemplate::new(
                Target::Item(ItemRef::Container),
                DAMAGE_MULTIPLIER,
                Operation::PostMul,
                ValueExpr::own_attr(DAMAGE_BONUS),
            )],
        ),
        EffectDefinition::declarative(
            MUTUAL_BOOST,
            "mutualBoost",
            EffectCategory::Passive,
            vec![
                ModifierTemplate::new(
                    Target::Item(ItemRef::SelfItem),
                    CYCLE_A,
                    Operation::ModAdd,
                    ValueExpr::own_attr(CYCLE_B),
                ),
                ModifierTemplate::new(
                    Target::Item(ItemRef::SelfItem),
                    CYCLE_B,
                    Operation::ModAdd,
                    ValueExpr::own_attr(CYCLE_A),
                ),
            ],
        ),
    ];
    for definition in definitions {
        registry.register(definition).expect("fixture effects are unique");
    }
    registry
}

/// Static data and handlers kept alive for the engine borrowing them.
pub struct Fixture {
    pub snapshot: StaticSnapshot,
    pub registry: EffectRegistry,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            snapshot: snapshot(),
            registry: registry(),
        }
    }

    pub fn env(&self) -> DogmaEnv<'_> {
        DogmaEnv::from_snapshot(&self.snapshot, &self.registry)
    }
}

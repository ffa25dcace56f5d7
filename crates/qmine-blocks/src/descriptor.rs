//! Block behavior descriptors: everything the engine needs to know about
//! one block type.

use rand::Rng;

use qmine_loot::{has_silk_touch, LootTable};
use qmine_world::{CoveragePrefs, GameMode, ItemStack, Permutation, PlayerPrefs, StateValue};

/// How a neighbouring block participates in a mining run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiningWay {
    LeaveAlone,
    /// Break normally. Consumes tool durability.
    MineRegularly,
    /// Break as a side effect of the origin. Never consumes durability,
    /// and loot resolves as if broken by hand.
    MineAsBonus,
}

// ---------------------------------------------------------------------------
// Tool rules
// ---------------------------------------------------------------------------

/// Tool class a block wants. Classes are detected through the host's item
/// tags; shears have no tag and match by type id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Pickaxe,
    Axe,
    Shovel,
    Hoe,
    Shears,
    HoeOrShears,
    /// No tool can start a run here. Sentinel blocks and guard-only
    /// blocks use this.
    Nothing,
}

impl ToolKind {
    fn matches(self, tool: &ItemStack) -> bool {
        let is_hoe = tool.has_tag("minecraft:is_hoe");
        let is_shears = tool.type_id == "minecraft:shears";
        match self {
            ToolKind::Pickaxe => tool.has_tag("minecraft:is_pickaxe"),
            ToolKind::Axe => tool.has_tag("minecraft:is_axe"),
            ToolKind::Shovel => tool.has_tag("minecraft:is_shovel"),
            ToolKind::Hoe => is_hoe,
            ToolKind::Shears => is_shears,
            ToolKind::HoeOrShears => is_hoe || is_shears,
            ToolKind::Nothing => false,
        }
    }
}

/// Minimum tool tier, detected through the host's tier tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tier {
    #[default]
    Any,
    Stone,
    Iron,
    Diamond,
}

impl Tier {
    fn met_by(self, tool: &ItemStack) -> bool {
        let stone = tool.has_tag("minecraft:stone_tier");
        let iron = tool.has_tag("minecraft:iron_tier");
        let diamond = tool.has_tag("minecraft:diamond_tier");
        let netherite = tool.has_tag("minecraft:netherite_tier");
        match self {
            Tier::Any => true,
            Tier::Stone => stone || iron || diamond || netherite,
            Tier::Iron => iron || diamond || netherite,
            Tier::Diamond => diamond || netherite,
        }
    }
}

/// Which per-player coverage toggle gates this block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    Leaves,
    Logs,
    Wood,
    StrippedLogs,
    StrippedWood,
    Mushrooms,
    Ores,
    Minerals,
    Crystals,
    Plants,
    Crops,
    Rocks,
    Soil,
    Ice,
    Sculk,
}

impl Coverage {
    pub fn enabled(self, c: &CoveragePrefs) -> bool {
        match self {
            Coverage::Leaves => c.leaves,
            Coverage::Logs => c.logs,
            Coverage::Wood => c.wood,
            Coverage::StrippedLogs => c.stripped_logs,
            Coverage::StrippedWood => c.stripped_wood,
            Coverage::Mushrooms => c.mushrooms,
            Coverage::Ores => c.ores,
            Coverage::Minerals => c.minerals,
            Coverage::Crystals => c.crystals,
            Coverage::Plants => c.plants,
            Coverage::Crops => c.crops,
            Coverage::Rocks => c.rocks,
            Coverage::Soil => c.soil,
            Coverage::Ice => c.ice,
            Coverage::Sculk => c.sculk,
        }
    }
}

/// Extra per-permutation gate on tool suitability.
#[derive(Debug, Clone)]
pub enum ToolGate {
    /// The named state must equal this value. Fully grown crops use this.
    StateEquals(&'static str, StateValue),
    /// The named state must be false or absent. Snow-logged plants use
    /// this to stay untouched.
    StateFalse(&'static str),
}

/// When a block lets a tool start or continue a run.
#[derive(Debug, Clone)]
pub struct ToolRule {
    pub kind: ToolKind,
    pub tier: Tier,
    pub needs_silk_touch: bool,
    pub coverage: Option<Coverage>,
    pub gate: Option<ToolGate>,
}

impl ToolRule {
    pub fn new(kind: ToolKind, coverage: Coverage) -> Self {
        Self {
            kind,
            tier: Tier::Any,
            needs_silk_touch: false,
            coverage: Some(coverage),
            gate: None,
        }
    }

    /// A rule that never matches any tool.
    pub fn nothing() -> Self {
        Self {
            kind: ToolKind::Nothing,
            tier: Tier::Any,
            needs_silk_touch: false,
            coverage: None,
            gate: None,
        }
    }

    pub fn tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    pub fn needs_silk_touch(mut self) -> Self {
        self.needs_silk_touch = true;
        self
    }

    pub fn gated(mut self, gate: ToolGate) -> Self {
        self.gate = Some(gate);
        self
    }
}

// ---------------------------------------------------------------------------
// Equivalence
// ---------------------------------------------------------------------------

/// When two permutations count as "the same block" for propagation and
/// commit-time revalidation.
#[derive(Debug, Clone)]
pub enum Equivalence {
    /// Type id and every state field must agree.
    Exact,
    /// Exact, except the named state field is ignored.
    IgnoringState(&'static str),
    /// Only the type id matters.
    TypeIdOnly,
    /// Any two members of this id set match, states ignored. Copper
    /// oxidation variants and lit/unlit redstone ore use this.
    AnyOf(Vec<String>),
    /// Members of this id set match across types when the named state
    /// agrees. Azalea and flowering azalea leaves use this.
    CrossTypeSameState { ids: Vec<String>, state: &'static str },
    /// Tall grass: ferns match snow-logged ferns, other variants match
    /// exactly.
    FernLike,
    /// Snow layers and snow blocks match each other at any height, but
    /// never when covering a plant.
    SnowLike,
}

impl Equivalence {
    pub fn matches(&self, a: &Permutation, b: &Permutation) -> bool {
        match self {
            Equivalence::Exact => a == b,
            Equivalence::IgnoringState(state) => a.eq_ignoring(b, state),
            Equivalence::TypeIdOnly => a.type_id() == b.type_id(),
            Equivalence::AnyOf(ids) => {
                ids.iter().any(|id| id == a.type_id()) && ids.iter().any(|id| id == b.type_id())
            }
            Equivalence::CrossTypeSameState { ids, state } => {
                if ids.iter().any(|id| id == a.type_id()) && ids.iter().any(|id| id == b.type_id())
                {
                    a.state(state) == b.state(state)
                } else {
                    false
                }
            }
            Equivalence::FernLike => {
                if a.type_id() != b.type_id() {
                    return false;
                }
                let variant = |p: &Permutation| match p.state("tall_grass_type") {
                    Some(StateValue::Str(s)) => s.clone(),
                    _ => "tall".to_string(),
                };
                let (va, vb) = (variant(a), variant(b));
                if va == "fern" || va == "snow" {
                    vb == "fern" || vb == "snow"
                } else {
                    va == vb
                }
            }
            Equivalence::SnowLike => {
                let snowy = |p: &Permutation| {
                    p.type_id() == "minecraft:snow_layer" || p.type_id() == "minecraft:snow"
                };
                snowy(a) && snowy(b) && !a.bool_state("covered_bit") && !b.bool_state("covered_bit")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Propagation
// ---------------------------------------------------------------------------

/// One wood-like part of a tree and the coverage toggle that gates it.
pub type TreePart = (String, Coverage);

/// A tree family: its wood-like parts, its leaf blocks, and whether the
/// mangrove companion rules apply.
#[derive(Debug, Clone, Default)]
pub struct TreeParts {
    pub parts: Vec<TreePart>,
    pub leaves: Vec<String>,
    pub mangrove_companions: bool,
}

/// How a run spreads from the origin block to a neighbour.
#[derive(Debug, Clone)]
pub enum Propagation {
    /// Spread to equivalent blocks only.
    Equivalent,
    /// Spread to any block of the same type id, states ignored. Huge
    /// mushroom blocks use this.
    SameTypeId,
    /// Spread through all wood-like parts of the family and bonus-mine
    /// its non-persistent leaves.
    Tree(TreeParts),
    /// Spread to equivalent blocks and bonus-mine attached colony
    /// members. Coral blocks use this.
    Colony { bonus: Vec<String> },
    /// Spread to any member of this id group. Wart blocks and
    /// shroomlight use this.
    Group(Vec<String>),
}

// ---------------------------------------------------------------------------
// Remaining per-block rules
// ---------------------------------------------------------------------------

/// Whether a regular (non-bonus) break wears the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurabilityRule {
    #[default]
    Always,
    Never,
    /// Shears pay durability, hoes break for free.
    NotWithHoe,
}

impl DurabilityRule {
    pub fn consumes(self, tool: &ItemStack) -> bool {
        match self {
            DurabilityRule::Always => true,
            DurabilityRule::Never => false,
            DurabilityRule::NotWithHoe => !tool.has_tag("minecraft:is_hoe"),
        }
    }
}

/// What a broken block turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakTransform {
    /// Air, or water when the block was waterlogged.
    #[default]
    Default,
    /// Ice melts into water when broken without silk touch outside the
    /// nether, unless the block below is air.
    IceMelt,
}

/// Experience orbs yielded by a regular break.
#[derive(Debug, Clone, Copy, Default)]
pub enum XpYield {
    #[default]
    None,
    Range(u32, u32),
}

impl XpYield {
    pub fn resolve(self, tool: Option<&ItemStack>, rng: &mut impl Rng) -> u32 {
        if has_silk_touch(tool) {
            return 0;
        }
        match self {
            XpYield::None => 0,
            XpYield::Range(min, max) => {
                if min >= max {
                    min
                } else {
                    rng.gen_range(min..=max)
                }
            }
        }
    }
}

/// Blocks the engine refuses to break at all for some players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Guard {
    #[default]
    None,
    /// Budding amethyst is irreplaceable; survival players can opt into
    /// keeping it safe.
    BuddingAmethyst,
}

impl Guard {
    pub fn protects(self, mode: GameMode, prefs: &PlayerPrefs) -> bool {
        match self {
            Guard::None => false,
            Guard::BuddingAmethyst => {
                mode == GameMode::Survival && prefs.protection.keep_budding_amethyst
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Loot rules
// ---------------------------------------------------------------------------

/// How a block selects its loot table per permutation.
#[derive(Debug, Clone)]
pub enum LootRule {
    /// Drop one of the block itself, however it is broken.
    SelfDrop,
    Nothing,
    Table(LootTable),
    /// Pick a table by the value of one state field. An absent field
    /// reads as `assume_absent` when set.
    ByState {
        key: &'static str,
        arms: Vec<(StateValue, LootTable)>,
        fallback: Option<LootTable>,
        assume_absent: Option<StateValue>,
    },
    /// Drop one of the block per occupied face bit. Glow lichen and
    /// sculk veins use this.
    MultiFaceCount { silk_touch_only: bool },
    /// Snowballs scaled by the layer height.
    SnowLayers,
    /// Mangrove propagules drop themselves only when fully grown or not
    /// hanging.
    Propagule,
}

impl LootRule {
    pub fn resolve(
        &self,
        perm: &Permutation,
        tool: Option<&ItemStack>,
        rng: &mut impl Rng,
    ) -> Vec<ItemStack> {
        match self {
            LootRule::SelfDrop => vec![ItemStack::new(perm.type_id().to_string(), 1)],
            LootRule::Nothing => Vec::new(),
            LootRule::Table(table) => table.resolve(tool, rng),
            LootRule::ByState {
                key,
                arms,
                fallback,
                assume_absent,
            } => {
                let value = perm.state(key).cloned().or_else(|| assume_absent.clone());
                if let Some(value) = value {
                    for (arm_value, table) in arms {
                        if *arm_value == value {
                            return table.resolve(tool, rng);
                        }
                    }
                }
                match fallback {
                    Some(table) => table.resolve(tool, rng),
                    None => Vec::new(),
                }
            }
            LootRule::MultiFaceCount { silk_touch_only } => {
                if *silk_touch_only && !has_silk_touch(tool) {
                    return Vec::new();
                }
                let bits = perm.int_state("multi_face_direction_bits").unwrap_or(63);
                let amount = (bits as u32) & 0x3f;
                let amount = amount.count_ones();
                if amount == 0 {
                    Vec::new()
                } else {
                    vec![ItemStack::new(perm.type_id().to_string(), amount)]
                }
            }
            LootRule::SnowLayers => {
                let height = perm.int_state("height").unwrap_or(0);
                let amount = match height {
                    0..=2 => 1,
                    3..=4 => 2,
                    5..=6 => 3,
                    _ => 4,
                };
                vec![ItemStack::new("minecraft:snowball", amount)]
            }
            LootRule::Propagule => {
                let stage = perm.int_state("propagule_stage").unwrap_or(0);
                if stage == 4 || !perm.bool_state("hanging") {
                    vec![ItemStack::new(perm.type_id().to_string(), 1)]
                } else {
                    Vec::new()
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// The descriptor
// ---------------------------------------------------------------------------

/// Immutable behavior record for one block type. Shared via `Arc` out of
/// the registry.
#[derive(Debug, Clone)]
pub struct BlockDescriptor {
    sound: String,
    tool: ToolRule,
    equivalence: Equivalence,
    propagation: Propagation,
    dependence: u8,
    durability: DurabilityRule,
    transform: BreakTransform,
    loot: LootRule,
    xp: XpYield,
    guard: Guard,
}

impl BlockDescriptor {
    pub fn new(sound: impl Into<String>, tool: ToolRule) -> Self {
        Self {
            sound: sound.into(),
            tool,
            equivalence: Equivalence::Exact,
            propagation: Propagation::Equivalent,
            dependence: 0,
            durability: DurabilityRule::Always,
            transform: BreakTransform::Default,
            loot: LootRule::SelfDrop,
            xp: XpYield::None,
            guard: Guard::None,
        }
    }

    /// Descriptor for blocks the engine does not know. No tool ever
    /// matches, so none of its other rules are reachable.
    pub fn sentinel() -> Self {
        Self::new("", ToolRule::nothing())
    }

    pub fn equivalence(mut self, equivalence: Equivalence) -> Self {
        self.equivalence = equivalence;
        self
    }

    pub fn propagation(mut self, propagation: Propagation) -> Self {
        self.propagation = propagation;
        self
    }

    pub fn dependence(mut self, level: u8) -> Self {
        self.dependence = level;
        self
    }

    pub fn durability(mut self, rule: DurabilityRule) -> Self {
        self.durability = rule;
        self
    }

    pub fn transform(mut self, transform: BreakTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn loot(mut self, loot: LootRule) -> Self {
        self.loot = loot;
        self
    }

    pub fn xp(mut self, xp: XpYield) -> Self {
        self.xp = xp;
        self
    }

    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = guard;
        self
    }

    // -- queries ----------------------------------------------------------

    pub fn breaking_sound(&self) -> &str {
        &self.sound
    }

    pub fn dependence_level(&self) -> u8 {
        self.dependence
    }

    pub fn break_transform(&self) -> BreakTransform {
        self.transform
    }

    pub fn is_protected(&self, mode: GameMode, prefs: &PlayerPrefs) -> bool {
        self.guard.protects(mode, prefs)
    }

    /// Whether a run may start on this block with this tool. A bare hand
    /// never qualifies.
    pub fn is_tool_suitable(
        &self,
        perm: &Permutation,
        tool: Option<&ItemStack>,
        prefs: &PlayerPrefs,
    ) -> bool {
        let Some(tool) = tool else {
            return false;
        };
        if let Some(coverage) = self.tool.coverage {
            if !coverage.enabled(&prefs.coverage) {
                return false;
            }
        }
        match &self.tool.gate {
            Some(ToolGate::StateEquals(key, value)) => {
                if perm.state(key) != Some(value) {
                    return false;
                }
            }
            Some(ToolGate::StateFalse(key)) => {
                if perm.bool_state(key) {
                    return false;
                }
            }
            None => {}
        }
        if self.tool.needs_silk_touch && !has_silk_touch(Some(tool)) {
            return false;
        }
        self.tool.kind.matches(tool) && self.tool.tier.met_by(tool)
    }

    pub fn is_equivalent(&self, a: &Permutation, b: &Permutation) -> bool {
        self.equivalence.matches(a, b)
    }

    /// How the block at `perm` participates in a run that started at
    /// `origin`. Called on the ORIGIN's descriptor.
    pub fn mining_way(
        &self,
        origin: &Permutation,
        perm: &Permutation,
        prefs: &PlayerPrefs,
    ) -> MiningWay {
        match &self.propagation {
            Propagation::Equivalent => {
                if self.equivalence.matches(origin, perm) {
                    MiningWay::MineRegularly
                } else {
                    MiningWay::LeaveAlone
                }
            }
            Propagation::SameTypeId => {
                if origin.type_id() == perm.type_id() {
                    MiningWay::MineRegularly
                } else {
                    MiningWay::LeaveAlone
                }
            }
            Propagation::Tree(tree) => {
                if tree.leaves.iter().any(|id| id == perm.type_id())
                    && !perm.bool_state("persistent_bit")
                {
                    return MiningWay::MineAsBonus;
                }
                for (id, coverage) in &tree.parts {
                    if id == perm.type_id() {
                        return if coverage.enabled(&prefs.coverage) {
                            MiningWay::MineRegularly
                        } else {
                            MiningWay::LeaveAlone
                        };
                    }
                }
                if tree.mangrove_companions {
                    match perm.type_id() {
                        "minecraft:mangrove_propagule" => {
                            // Spread only to hanging propagules, whatever
                            // their growth stage. Immature ones drop
                            // nothing but are still cleared.
                            if perm.bool_state("hanging") {
                                return MiningWay::MineAsBonus;
                            }
                        }
                        "minecraft:moss_carpet" => return MiningWay::MineAsBonus,
                        _ => {}
                    }
                }
                MiningWay::LeaveAlone
            }
            Propagation::Colony { bonus } => {
                if self.equivalence.matches(origin, perm) {
                    MiningWay::MineRegularly
                } else if bonus.iter().any(|id| id == perm.type_id()) {
                    MiningWay::MineAsBonus
                } else {
                    MiningWay::LeaveAlone
                }
            }
            Propagation::Group(ids) => {
                if ids.iter().any(|id| id == perm.type_id()) {
                    MiningWay::MineRegularly
                } else {
                    MiningWay::LeaveAlone
                }
            }
        }
    }

    pub fn consumes_durability(&self, tool: &ItemStack) -> bool {
        self.durability.consumes(tool)
    }

    pub fn resolve_loot(
        &self,
        perm: &Permutation,
        tool: Option<&ItemStack>,
        rng: &mut impl Rng,
    ) -> Vec<ItemStack> {
        self.loot.resolve(perm, tool, rng)
    }

    pub fn experience(&self, tool: Option<&ItemStack>, rng: &mut impl Rng) -> u32 {
        self.xp.resolve(tool, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(3)
    }

    fn axe() -> ItemStack {
        ItemStack::new("minecraft:iron_axe", 1)
            .with_tag("minecraft:is_axe")
            .with_tag("minecraft:iron_tier")
    }

    fn iron_pick() -> ItemStack {
        ItemStack::new("minecraft:iron_pickaxe", 1)
            .with_tag("minecraft:is_pickaxe")
            .with_tag("minecraft:iron_tier")
    }

    fn stone_pick() -> ItemStack {
        ItemStack::new("minecraft:stone_pickaxe", 1)
            .with_tag("minecraft:is_pickaxe")
            .with_tag("minecraft:stone_tier")
    }

    #[test]
    fn tier_gates_tool_suitability() {
        let prefs = PlayerPrefs::default();
        let desc = BlockDescriptor::new(
            "dig.stone",
            ToolRule::new(ToolKind::Pickaxe, Coverage::Ores).tier(Tier::Iron),
        );
        let perm = Permutation::new("minecraft:diamond_ore");
        assert!(desc.is_tool_suitable(&perm, Some(&iron_pick()), &prefs));
        assert!(!desc.is_tool_suitable(&perm, Some(&stone_pick()), &prefs));
        assert!(!desc.is_tool_suitable(&perm, None, &prefs));
    }

    #[test]
    fn coverage_toggle_disables_suitability() {
        let mut prefs = PlayerPrefs::default();
        let desc = BlockDescriptor::new(
            "dig.stone",
            ToolRule::new(ToolKind::Pickaxe, Coverage::Ores),
        );
        let perm = Permutation::new("minecraft:coal_ore");
        assert!(desc.is_tool_suitable(&perm, Some(&stone_pick()), &prefs));
        prefs.coverage.ores = false;
        assert!(!desc.is_tool_suitable(&perm, Some(&stone_pick()), &prefs));
    }

    #[test]
    fn growth_gate_blocks_immature_crops() {
        let prefs = PlayerPrefs::default();
        let hoe = ItemStack::new("minecraft:iron_hoe", 1).with_tag("minecraft:is_hoe");
        let desc = BlockDescriptor::new(
            "dig.wood",
            ToolRule::new(ToolKind::Hoe, Coverage::Crops)
                .gated(ToolGate::StateEquals("growth", StateValue::Int(7))),
        );
        let grown = Permutation::new("minecraft:wheat").with_state("growth", 7);
        let young = Permutation::new("minecraft:wheat").with_state("growth", 3);
        assert!(desc.is_tool_suitable(&grown, Some(&hoe), &prefs));
        assert!(!desc.is_tool_suitable(&young, Some(&hoe), &prefs));
    }

    #[test]
    fn any_of_equivalence_ignores_states() {
        let eq = Equivalence::AnyOf(vec![
            "minecraft:redstone_ore".into(),
            "minecraft:lit_redstone_ore".into(),
        ]);
        let unlit = Permutation::new("minecraft:redstone_ore");
        let lit = Permutation::new("minecraft:lit_redstone_ore");
        let other = Permutation::new("minecraft:coal_ore");
        assert!(eq.matches(&unlit, &lit));
        assert!(eq.matches(&lit, &lit));
        assert!(!eq.matches(&unlit, &other));
    }

    #[test]
    fn cross_type_equivalence_requires_matching_state() {
        let eq = Equivalence::CrossTypeSameState {
            ids: vec![
                "minecraft:azalea_leaves".into(),
                "minecraft:azalea_leaves_flowered".into(),
            ],
            state: "persistent_bit",
        };
        let plain = Permutation::new("minecraft:azalea_leaves").with_state("persistent_bit", false);
        let flowered =
            Permutation::new("minecraft:azalea_leaves_flowered").with_state("persistent_bit", false);
        let placed =
            Permutation::new("minecraft:azalea_leaves_flowered").with_state("persistent_bit", true);
        assert!(eq.matches(&plain, &flowered));
        assert!(!eq.matches(&plain, &placed));
    }

    #[test]
    fn fern_matches_snow_logged_fern() {
        let eq = Equivalence::FernLike;
        let fern = Permutation::new("minecraft:tallgrass").with_state("tall_grass_type", "fern");
        let snow = Permutation::new("minecraft:tallgrass").with_state("tall_grass_type", "snow");
        let tall = Permutation::new("minecraft:tallgrass").with_state("tall_grass_type", "tall");
        assert!(eq.matches(&fern, &snow));
        assert!(eq.matches(&snow, &fern));
        assert!(!eq.matches(&fern, &tall));
        assert!(eq.matches(&tall, &tall));
    }

    #[test]
    fn snow_like_leaves_covered_plants_alone() {
        let eq = Equivalence::SnowLike;
        let layer = Permutation::new("minecraft:snow_layer").with_state("height", 2);
        let block = Permutation::new("minecraft:snow");
        let covering = Permutation::new("minecraft:snow_layer").with_state("covered_bit", true);
        assert!(eq.matches(&layer, &block));
        assert!(!eq.matches(&layer, &covering));
    }

    #[test]
    fn tree_propagation_bonus_mines_leaves() {
        let prefs = PlayerPrefs::default();
        let desc = BlockDescriptor::new("dig.wood", ToolRule::new(ToolKind::Axe, Coverage::Logs))
            .equivalence(Equivalence::IgnoringState("pillar_axis"))
            .propagation(Propagation::Tree(TreeParts {
                parts: vec![
                    ("minecraft:oak_log".into(), Coverage::Logs),
                    ("minecraft:oak_wood".into(), Coverage::Wood),
                ],
                leaves: vec!["minecraft:oak_leaves".into()],
                mangrove_companions: false,
            }));

        let origin = Permutation::new("minecraft:oak_log").with_state("pillar_axis", "y");
        let wild = Permutation::new("minecraft:oak_leaves");
        let placed = Permutation::new("minecraft:oak_leaves").with_state("persistent_bit", true);
        let wood = Permutation::new("minecraft:oak_wood");

        assert_eq!(desc.mining_way(&origin, &wild, &prefs), MiningWay::MineAsBonus);
        assert_eq!(desc.mining_way(&origin, &placed, &prefs), MiningWay::LeaveAlone);
        assert_eq!(desc.mining_way(&origin, &wood, &prefs), MiningWay::MineRegularly);

        let mut no_wood = PlayerPrefs::default();
        no_wood.coverage.wood = false;
        assert_eq!(desc.mining_way(&origin, &wood, &no_wood), MiningWay::LeaveAlone);
    }

    #[test]
    fn mangrove_companions() {
        let prefs = PlayerPrefs::default();
        let desc = BlockDescriptor::new("dig.wood", ToolRule::new(ToolKind::Axe, Coverage::Logs))
            .propagation(Propagation::Tree(TreeParts {
                parts: vec![("minecraft:mangrove_log".into(), Coverage::Logs)],
                leaves: vec!["minecraft:mangrove_leaves".into()],
                mangrove_companions: true,
            }));

        let origin = Permutation::new("minecraft:mangrove_log");
        let hanging = Permutation::new("minecraft:mangrove_propagule")
            .with_state("hanging", true)
            .with_state("propagule_stage", 1);
        let planted = Permutation::new("minecraft:mangrove_propagule").with_state("hanging", false);
        let carpet = Permutation::new("minecraft:moss_carpet");

        assert_eq!(desc.mining_way(&origin, &hanging, &prefs), MiningWay::MineAsBonus);
        assert_eq!(desc.mining_way(&origin, &planted, &prefs), MiningWay::LeaveAlone);
        assert_eq!(desc.mining_way(&origin, &carpet, &prefs), MiningWay::MineAsBonus);
    }

    #[test]
    fn multi_face_loot_counts_bits() {
        let rule = LootRule::MultiFaceCount {
            silk_touch_only: false,
        };
        let mut r = rng();
        let three = Permutation::new("minecraft:glow_lichen")
            .with_state("multi_face_direction_bits", 0b000111);
        let drops = rule.resolve(&three, None, &mut r);
        assert_eq!(drops[0].amount, 3);

        // Absent bits read as all six faces.
        let all = Permutation::new("minecraft:glow_lichen");
        assert_eq!(rule.resolve(&all, None, &mut r)[0].amount, 6);
    }

    #[test]
    fn propagule_loot_rules() {
        let rule = LootRule::Propagule;
        let mut r = rng();
        let mature = Permutation::new("minecraft:mangrove_propagule")
            .with_state("hanging", true)
            .with_state("propagule_stage", 4);
        let immature = Permutation::new("minecraft:mangrove_propagule")
            .with_state("hanging", true)
            .with_state("propagule_stage", 1);
        let planted = Permutation::new("minecraft:mangrove_propagule").with_state("hanging", false);
        assert_eq!(rule.resolve(&mature, None, &mut r).len(), 1);
        assert!(rule.resolve(&immature, None, &mut r).is_empty());
        assert_eq!(rule.resolve(&planted, None, &mut r).len(), 1);
    }

    #[test]
    fn snow_layer_loot_scales_with_height() {
        let rule = LootRule::SnowLayers;
        let mut r = rng();
        for (height, expected) in [(0, 1), (2, 1), (3, 2), (6, 3), (7, 4)] {
            let perm = Permutation::new("minecraft:snow_layer").with_state("height", height);
            assert_eq!(rule.resolve(&perm, None, &mut r)[0].amount, expected);
        }
    }

    #[test]
    fn silk_touch_suppresses_xp() {
        let xp = XpYield::Range(3, 7);
        let silk = iron_pick().with_enchantment("silk_touch", 1);
        let mut r = rng();
        assert_eq!(xp.resolve(Some(&silk), &mut r), 0);
        for _ in 0..50 {
            let n = xp.resolve(Some(&iron_pick()), &mut r);
            assert!((3..=7).contains(&n));
        }
    }

    #[test]
    fn budding_amethyst_guard() {
        let prefs = PlayerPrefs::default();
        assert!(Guard::BuddingAmethyst.protects(GameMode::Survival, &prefs));
        assert!(!Guard::BuddingAmethyst.protects(GameMode::Creative, &prefs));
        let mut relaxed = PlayerPrefs::default();
        relaxed.protection.keep_budding_amethyst = false;
        assert!(!Guard::BuddingAmethyst.protects(GameMode::Survival, &relaxed));
    }

    #[test]
    fn durability_rules() {
        let hoe = ItemStack::new("minecraft:iron_hoe", 1).with_tag("minecraft:is_hoe");
        let shears = ItemStack::new("minecraft:shears", 1);
        assert!(DurabilityRule::Always.consumes(&shears));
        assert!(!DurabilityRule::Never.consumes(&shears));
        assert!(!DurabilityRule::NotWithHoe.consumes(&hoe));
        assert!(DurabilityRule::NotWithHoe.consumes(&shears));
    }

    #[test]
    fn sentinel_matches_no_tool() {
        let prefs = PlayerPrefs::default();
        let desc = BlockDescriptor::sentinel();
        let perm = Permutation::new("minecraft:bedrock");
        assert!(!desc.is_tool_suitable(&perm, Some(&iron_pick()), &prefs));
        assert!(!desc.is_tool_suitable(&perm, Some(&axe()), &prefs));
    }
}

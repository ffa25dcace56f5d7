//! Tree trunks: logs, wood, their stripped forms, and the hangers-on.

use qmine_loot::{LootCondition, LootEntry, LootPool, LootTable};

use crate::descriptor::{
    BlockDescriptor, Coverage, Equivalence, LootRule, Propagation, ToolKind, ToolRule, TreeParts,
};
use crate::registry::{BlockRegistry, RegistryError};

fn standard_parts(species: &str) -> Vec<(String, Coverage)> {
    vec![
        (format!("minecraft:{species}_log"), Coverage::Logs),
        (format!("minecraft:{species}_wood"), Coverage::Wood),
        (format!("minecraft:stripped_{species}_log"), Coverage::StrippedLogs),
        (format!("minecraft:stripped_{species}_wood"), Coverage::StrippedWood),
    ]
}

fn stem_parts(species: &str) -> Vec<(String, Coverage)> {
    vec![
        (format!("minecraft:{species}_stem"), Coverage::Logs),
        (format!("minecraft:{species}_hyphae"), Coverage::Wood),
        (format!("minecraft:stripped_{species}_stem"), Coverage::StrippedLogs),
        (format!("minecraft:stripped_{species}_hyphae"), Coverage::StrippedWood),
    ]
}

/// Register every part of one family. Each part is a separate entry so
/// its own coverage toggle gates it as an origin, but all share the
/// family for propagation.
fn register_family(
    reg: &mut BlockRegistry,
    family: TreeParts,
    sound_for: impl Fn(&str) -> &'static str,
) -> Result<(), RegistryError> {
    for (id, coverage) in family.parts.clone() {
        reg.register_block(
            id.clone(),
            BlockDescriptor::new(sound_for(&id), ToolRule::new(ToolKind::Axe, coverage))
                .equivalence(Equivalence::IgnoringState("pillar_axis"))
                .propagation(Propagation::Tree(family.clone())),
        )?;
    }
    Ok(())
}

pub(crate) fn register(reg: &mut BlockRegistry) -> Result<(), RegistryError> {
    for species in [
        "oak", "spruce", "birch", "jungle", "acacia", "dark_oak", "cherry", "pale_oak",
    ] {
        // Azalea bushes grow on oak trunks, so oak carries their leaves
        // too.
        let leaves = if species == "oak" {
            vec![
                "minecraft:oak_leaves".to_string(),
                "minecraft:azalea_leaves".to_string(),
                "minecraft:azalea_leaves_flowered".to_string(),
            ]
        } else {
            vec![format!("minecraft:{species}_leaves")]
        };
        register_family(
            reg,
            TreeParts {
                parts: standard_parts(species),
                leaves,
                mangrove_companions: false,
            },
            |_| "dig.wood",
        )?;
    }

    // Nether fungi have no leaves to shake loose.
    for species in ["crimson", "warped"] {
        register_family(
            reg,
            TreeParts {
                parts: stem_parts(species),
                leaves: Vec::new(),
                mangrove_companions: false,
            },
            |_| "dig.wood",
        )?;
    }

    // Mangroves stand on roots, which count as logs, and carry
    // propagules and moss carpets that come down with the tree.
    let mut mangrove_parts = standard_parts("mangrove");
    mangrove_parts.push(("minecraft:mangrove_roots".to_string(), Coverage::Logs));
    register_family(
        reg,
        TreeParts {
            parts: mangrove_parts,
            leaves: vec!["minecraft:mangrove_leaves".to_string()],
            mangrove_companions: true,
        },
        |id| {
            if id == "minecraft:mangrove_roots" {
                "block.mangrove_roots.break"
            } else {
                "dig.wood"
            }
        },
    )?;

    // Propagules never start a run themselves. Only mature or planted
    // ones drop.
    reg.register_block(
        "minecraft:mangrove_propagule",
        BlockDescriptor::new("dig.grass", ToolRule::nothing())
            .equivalence(Equivalence::TypeIdOnly)
            .dependence(3)
            .loot(LootRule::Propagule),
    )?;

    reg.register_block(
        "minecraft:bookshelf",
        BlockDescriptor::new("dig.wood", ToolRule::new(ToolKind::Axe, Coverage::Wood)).loot(
            LootRule::Table(
                LootTable::new()
                    .when(
                        LootCondition::silk_touch(),
                        vec![LootPool::single(LootEntry::item("minecraft:bookshelf", 1))],
                    )
                    .always(vec![LootPool::single(LootEntry::item("minecraft:book", 3))]),
            ),
        ),
    )?;

    Ok(())
}

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, OnceLock, Weak};
use std::thread;

use range_core::{RangeCatalog, RangeKind, RangeParams, SprinklerTier, Tile};
use range_overlay::{
    BuildingDescriptor, BuildingKind, ButtonState, ContextKey, CycleOutcome, FrameOrchestrator,
    HookPoint, HostWorld, ItemDescriptor, ItemId, LocalEventHub, OverlayConfig,
    OverlayController, RenderOutcome, SkipReason, TargetSource, TickEvent, TileCanvas, TileTint,
};

/// Host world whose state can be rewritten between ticks.
#[derive(Default)]
struct ScriptedWorld {
    state: Mutex<WorldState>,
}

#[derive(Default, Clone)]
struct WorldState {
    menu_open: bool,
    cursor: Tile,
    held: HashMap<ContextKey, ItemDescriptor>,
    hovered: Option<ItemDescriptor>,
    placed: Vec<ItemDescriptor>,
    on_hut: bool,
    buildings: Vec<BuildingDescriptor>,
}

impl ScriptedWorld {
    fn update(&self, change: impl FnOnce(&mut WorldState)) {
        change(&mut self.state.lock().unwrap());
    }
}

impl HostWorld for ScriptedWorld {
    fn has_current_area(&self, _ctx: ContextKey) -> bool {
        true
    }

    fn is_overlay_eligible(&self, _ctx: ContextKey) -> bool {
        !self.state.lock().unwrap().menu_open
    }

    fn held_item(&self, ctx: ContextKey) -> Option<ItemDescriptor> {
        self.state.lock().unwrap().held.get(&ctx).cloned()
    }

    fn hovered_item(&self, _ctx: ContextKey) -> Option<ItemDescriptor> {
        self.state.lock().unwrap().hovered.clone()
    }

    fn placed_items_in_area(&self, _ctx: ContextKey, needle: &str) -> Vec<ItemDescriptor> {
        let needle = needle.to_lowercase();
        self.state
            .lock()
            .unwrap()
            .placed
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    fn valid_placement_tile(&self, _ctx: ContextKey, item: &ItemDescriptor) -> Tile {
        let state = self.state.lock().unwrap();
        item.tile.unwrap_or(state.cursor)
    }

    fn building_at_placement_tile(&self, _ctx: ContextKey) -> Option<BuildingDescriptor> {
        let state = self.state.lock().unwrap();
        if state.on_hut {
            state.buildings.first().copied()
        } else {
            None
        }
    }

    fn buildings_in_area(&self, _ctx: ContextKey) -> Vec<BuildingDescriptor> {
        self.state.lock().unwrap().buildings.clone()
    }
}

#[derive(Default)]
struct RecordingCanvas {
    tiles: Vec<(Tile, TileTint)>,
}

impl TileCanvas for RecordingCanvas {
    fn draw_tile(&mut self, tile: Tile, tint: TileTint) {
        self.tiles.push((tile, tint));
    }
}

fn setup(config: OverlayConfig) -> (Arc<ScriptedWorld>, FrameOrchestrator) {
    let world = Arc::new(ScriptedWorld::default());
    let orchestrator = FrameOrchestrator::new(world.clone(), &config);
    (world, orchestrator)
}

fn published(outcome: CycleOutcome) -> range_overlay::CycleSummary {
    match outcome {
        CycleOutcome::Published(summary) => summary,
        CycleOutcome::Skipped(reason) => panic!("expected a published cycle, got {reason:?}"),
    }
}

fn tick(context: ContextKey, tick: u64) -> TickEvent {
    TickEvent::new(context, tick)
}

fn scarecrow_len() -> usize {
    RangeCatalog::mask(RangeKind::Scarecrow, &RangeParams::default()).len()
}

#[test]
fn held_scarecrow_sees_distant_placed_scarecrow_as_other() {
    let (world, orchestrator) = setup(OverlayConfig::default());
    world.update(|state| {
        state
            .held
            .insert(ContextKey::PRIMARY, ItemDescriptor::new(ItemId(1), "Scarecrow"));
        state.placed = vec![
            ItemDescriptor::new(ItemId(2), "Scarecrow").placed_at(Tile::new(100, 100)),
            ItemDescriptor::new(ItemId(3), "Chest").placed_at(Tile::new(2, 2)),
        ];
    });

    let summary = published(orchestrator.on_tick(tick(ContextKey::PRIMARY, 0)));

    assert_eq!(summary.targeted.map(|t| t.source), Some(TargetSource::Held));
    assert_eq!(summary.targeted.map(|t| t.others), Some(1));
    assert_eq!(summary.intersection, 0);
    assert_eq!(summary.other, 2 * scarecrow_len());
}

#[test]
fn deluxe_scarecrow_overlap_is_split_out() {
    let (world, orchestrator) = setup(OverlayConfig::default());
    world.update(|state| {
        state.held.insert(
            ContextKey::PRIMARY,
            ItemDescriptor::new(ItemId(1), "Scarecrow").with_scarecrow_radius(2),
        );
        state.placed = vec![
            ItemDescriptor::new(ItemId(2), "Deluxe Scarecrow")
                .with_scarecrow_radius(2)
                .placed_at(Tile::new(1, 0)),
        ];
    });

    let summary = published(orchestrator.on_tick(tick(ContextKey::PRIMARY, 0)));
    let area = orchestrator.snapshot(ContextKey::PRIMARY).unwrap();

    // Radius 1.99 is the 3x3 square: 9 tiles each, 6 shared.
    assert_eq!(summary.current, 9);
    assert_eq!(area.intersection().len(), 6);
    assert_eq!(area.other().len(), 6);
    assert!(area.intersection().contains(&Tile::new(0, 0)));
    assert!(area.other().contains(&Tile::new(-1, 0)));
    assert!(area.other().contains(&Tile::new(2, 0)));
}

#[test]
fn show_all_skips_the_hovered_object_itself() {
    let (world, orchestrator) = setup(OverlayConfig {
        button_control_show: true,
        ..OverlayConfig::default()
    });
    let footprint = SprinklerTier::Quality.footprint(false);
    let hovered = ItemDescriptor::new(ItemId(5), "Quality Sprinkler")
        .placed_at(Tile::new(3, 3))
        .with_footprint(footprint.clone());
    world.update(|state| {
        state.hovered = Some(hovered.clone());
        state.placed = vec![
            hovered.clone(),
            ItemDescriptor::new(ItemId(6), "Sprinkler")
                .placed_at(Tile::new(20, 20))
                .with_footprint(SprinklerTier::Basic.footprint(false)),
        ];
    });

    orchestrator.on_buttons_changed(
        ContextKey::PRIMARY,
        ButtonState {
            show_all_down: true,
            player_free: true,
            ..ButtonState::default()
        },
    );
    let summary = published(orchestrator.on_tick(tick(ContextKey::PRIMARY, 0)));

    assert_eq!(
        summary.targeted.map(|t| t.source),
        Some(TargetSource::Hovered { show_all: true })
    );
    assert_eq!(summary.targeted.map(|t| t.others), Some(1));
    assert_eq!(summary.current, footprint.len());
    assert_eq!(summary.intersection, 0);
    assert_eq!(summary.other, footprint.len() + 4);
}

#[test]
fn show_one_trigger_is_consumed_after_publish() {
    let (world, orchestrator) = setup(OverlayConfig {
        button_control_show: true,
        ..OverlayConfig::default()
    });
    world.update(|state| {
        state.hovered = Some(ItemDescriptor::new(ItemId(9), "Bee House").placed_at(Tile::new(0, 0)));
    });

    orchestrator.on_buttons_changed(
        ContextKey::PRIMARY,
        ButtonState {
            show_one_down: true,
            player_free: true,
            ..ButtonState::default()
        },
    );
    let first = published(orchestrator.on_tick(tick(ContextKey::PRIMARY, 0)));
    assert_eq!(first.targeted.map(|t| t.kind), Some(RangeKind::BeeHouse));
    assert!(
        !orchestrator
            .context(ContextKey::PRIMARY)
            .control()
            .triggers
            .any_armed()
    );

    // No key press since the last cycle: falls back to held mode, which has nothing.
    let second = published(orchestrator.on_tick(tick(ContextKey::PRIMARY, 4)));
    assert_eq!(second.targeted, None);
    assert!(orchestrator.snapshot(ContextKey::PRIMARY).unwrap().is_empty());
}

#[test]
fn triggers_wait_for_next_on_cadence_tick() {
    let (world, orchestrator) = setup(OverlayConfig {
        button_control_show: true,
        ..OverlayConfig::default()
    });
    world.update(|state| {
        state.hovered = Some(ItemDescriptor::new(ItemId(9), "Mossy Seed").placed_at(Tile::new(0, 0)));
    });

    orchestrator.on_buttons_changed(
        ContextKey::PRIMARY,
        ButtonState {
            show_one_down: true,
            player_free: true,
            ..ButtonState::default()
        },
    );
    assert_eq!(
        orchestrator.on_tick(tick(ContextKey::PRIMARY, 1)),
        CycleOutcome::Skipped(SkipReason::OffCadence)
    );

    let summary = published(orchestrator.on_tick(tick(ContextKey::PRIMARY, 4)));
    assert_eq!(summary.targeted.map(|t| t.kind), Some(RangeKind::MossySeed));
    assert_eq!(summary.other, 11 * 11);
}

#[test]
fn hovered_bomb_is_never_shown() {
    let (world, orchestrator) = setup(OverlayConfig {
        button_control_show: true,
        show_bomb_range: true,
        ..OverlayConfig::default()
    });
    world.update(|state| {
        state.hovered = Some(ItemDescriptor::new(ItemId(9), "Cherry Bomb").placed_at(Tile::new(0, 0)));
    });

    orchestrator.on_buttons_changed(
        ContextKey::PRIMARY,
        ButtonState {
            show_one_down: true,
            player_free: true,
            ..ButtonState::default()
        },
    );
    let summary = published(orchestrator.on_tick(tick(ContextKey::PRIMARY, 0)));

    assert_eq!(summary.targeted, None);
}

#[test]
fn junimo_huts_are_shown_from_hut_centre() {
    let (world, orchestrator) = setup(OverlayConfig::default());
    world.update(|state| {
        state.on_hut = true;
        state.buildings = vec![
            BuildingDescriptor {
                id: ItemId(1),
                kind: BuildingKind::JunimoHut,
                tile: Tile::new(10, 10),
            },
            BuildingDescriptor {
                id: ItemId(2),
                kind: BuildingKind::Other,
                tile: Tile::new(0, 0),
            },
            BuildingDescriptor {
                id: ItemId(3),
                kind: BuildingKind::JunimoHut,
                tile: Tile::new(60, 60),
            },
        ];
    });

    let summary = published(orchestrator.on_tick(tick(ContextKey::PRIMARY, 0)));
    let area = orchestrator.snapshot(ContextKey::PRIMARY).unwrap();

    assert_eq!(summary.junimo_huts, 2);
    assert_eq!(area.other().len(), 2 * 17 * 17);
    // Centre (11, 11), square of side 17.
    assert!(area.other().contains(&Tile::new(3, 3)));
    assert!(area.other().contains(&Tile::new(19, 19)));
    assert!(!area.other().contains(&Tile::new(20, 19)));
}

#[test]
fn gated_cycle_leaves_previous_result_visible() {
    let (world, orchestrator) = setup(OverlayConfig::default());
    world.update(|state| {
        state
            .held
            .insert(ContextKey::PRIMARY, ItemDescriptor::new(ItemId(1), "Mushroom Log"));
    });
    published(orchestrator.on_tick(tick(ContextKey::PRIMARY, 0)));
    let before = orchestrator.snapshot(ContextKey::PRIMARY).unwrap();

    world.update(|state| {
        state.menu_open = true;
        state.held.clear();
    });
    assert_eq!(
        orchestrator.on_tick(tick(ContextKey::PRIMARY, 4)),
        CycleOutcome::Skipped(SkipReason::NotEligible)
    );

    assert_eq!(orchestrator.snapshot(ContextKey::PRIMARY).unwrap(), before);
    assert_eq!(before.other().len(), 15 * 15);
}

#[test]
fn contexts_are_isolated() {
    let (world, orchestrator) = setup(OverlayConfig::default());
    let left = ContextKey(0);
    let right = ContextKey(1);
    world.update(|state| {
        state
            .held
            .insert(left, ItemDescriptor::new(ItemId(1), "Iridium Sprinkler"));
    });

    published(orchestrator.on_tick(tick(left, 0)));
    published(orchestrator.on_tick(tick(right, 0)));

    assert_eq!(orchestrator.snapshot(left).unwrap().current().len(), 25);
    assert!(orchestrator.snapshot(right).unwrap().is_empty());
}

#[test]
fn controller_drives_cycles_through_event_hub() {
    let world = Arc::new(ScriptedWorld::default());
    let hub = Arc::new(LocalEventHub::new());
    let mut controller =
        OverlayController::from_config(world.clone(), hub.clone(), &OverlayConfig::default());
    world.update(|state| {
        state.cursor = Tile::new(4, 4);
        state
            .held
            .insert(ContextKey::PRIMARY, ItemDescriptor::new(ItemId(1), "Bee House"));
    });

    assert_eq!(hub.fire_tick(tick(ContextKey::PRIMARY, 0)), 1);
    let mut canvas = RecordingCanvas::default();
    assert_eq!(hub.fire_render(ContextKey::PRIMARY, &mut canvas), 1);

    let drawn: HashSet<Tile> = canvas.tiles.iter().map(|&(tile, _)| tile).collect();
    let bee_house = RangeCatalog::mask(RangeKind::BeeHouse, &RangeParams::default());
    assert_eq!(drawn.len(), bee_house.len());
    assert!(drawn.contains(&Tile::new(4, 4)));
    assert!(drawn.contains(&Tile::new(9, 4)));
    assert!(canvas.tiles.iter().all(|&(_, tint)| tint == TileTint::Range));

    controller.toggle(false);
    assert_eq!(hub.fire_tick(tick(ContextKey::PRIMARY, 4)), 0);
    assert_eq!(hub.fire_render(ContextKey::PRIMARY, &mut canvas), 0);
    assert_eq!(hub.fire_buttons(ContextKey::PRIMARY, ButtonState::default()), 0);

    controller.toggle(true);
    assert_eq!(hub.handler_count(HookPoint::Buttons), 1);
    assert_eq!(hub.fire_tick(tick(ContextKey::PRIMARY, 8)), 1);

    controller.dispose();
    assert_eq!(hub.handler_count(HookPoint::Tick), 0);
}

#[test]
fn buttons_hook_arms_hover_mode() {
    let world = Arc::new(ScriptedWorld::default());
    let hub = Arc::new(LocalEventHub::new());
    let config = OverlayConfig {
        button_control_show: true,
        ..OverlayConfig::default()
    };
    let controller = OverlayController::from_config(world.clone(), hub.clone(), &config);
    world.update(|state| {
        state.hovered = Some(ItemDescriptor::new(ItemId(3), "Scarecrow").placed_at(Tile::new(0, 0)));
    });

    hub.fire_buttons(
        ContextKey::PRIMARY,
        ButtonState {
            show_one_down: true,
            player_free: true,
            ..ButtonState::default()
        },
    );
    hub.fire_tick(tick(ContextKey::PRIMARY, 0));

    let area = controller
        .orchestrator()
        .snapshot(ContextKey::PRIMARY)
        .unwrap();
    assert_eq!(area.current().len(), scarecrow_len());
}

/// Host world that calls back into the orchestrator while a cycle is querying
/// placed items, the way a host's render thread or input events can.
struct ReentrantWorld {
    inner: ScriptedWorld,
    orchestrator: OnceLock<Weak<FrameOrchestrator>>,
    renders: Mutex<Vec<RenderOutcome>>,
    press_during_query: Mutex<Option<ButtonState>>,
}

impl ReentrantWorld {
    fn new() -> Self {
        Self {
            inner: ScriptedWorld::default(),
            orchestrator: OnceLock::new(),
            renders: Mutex::new(Vec::new()),
            press_during_query: Mutex::new(None),
        }
    }
}

impl HostWorld for ReentrantWorld {
    fn has_current_area(&self, ctx: ContextKey) -> bool {
        self.inner.has_current_area(ctx)
    }

    fn is_overlay_eligible(&self, ctx: ContextKey) -> bool {
        self.inner.is_overlay_eligible(ctx)
    }

    fn held_item(&self, ctx: ContextKey) -> Option<ItemDescriptor> {
        self.inner.held_item(ctx)
    }

    fn hovered_item(&self, ctx: ContextKey) -> Option<ItemDescriptor> {
        self.inner.hovered_item(ctx)
    }

    fn placed_items_in_area(&self, ctx: ContextKey, needle: &str) -> Vec<ItemDescriptor> {
        if let Some(orchestrator) = self.orchestrator.get().and_then(Weak::upgrade) {
            let outcome = thread::scope(|scope| {
                scope
                    .spawn(|| orchestrator.render(ctx, &mut RecordingCanvas::default()))
                    .join()
                    .unwrap()
            });
            self.renders.lock().unwrap().push(outcome);

            if let Some(buttons) = self.press_during_query.lock().unwrap().take() {
                orchestrator.on_buttons_changed(ctx, buttons);
            }
        }
        self.inner.placed_items_in_area(ctx, needle)
    }

    fn valid_placement_tile(&self, ctx: ContextKey, item: &ItemDescriptor) -> Tile {
        self.inner.valid_placement_tile(ctx, item)
    }
}

fn reentrant_setup(config: OverlayConfig) -> (Arc<ReentrantWorld>, Arc<FrameOrchestrator>) {
    let world = Arc::new(ReentrantWorld::new());
    let orchestrator = Arc::new(FrameOrchestrator::new(world.clone(), &config));
    world
        .orchestrator
        .set(Arc::downgrade(&orchestrator))
        .unwrap();
    (world, orchestrator)
}

#[test]
fn render_during_accumulation_shows_previous_cycle() {
    let (world, orchestrator) = reentrant_setup(OverlayConfig::default());
    world.inner.update(|state| {
        state
            .held
            .insert(ContextKey::PRIMARY, ItemDescriptor::new(ItemId(1), "Scarecrow"));
        state.placed = vec![ItemDescriptor::new(ItemId(2), "Scarecrow").placed_at(Tile::new(50, 0))];
    });

    let first = published(orchestrator.on_tick(tick(ContextKey::PRIMARY, 0)));
    let before = orchestrator.snapshot(ContextKey::PRIMARY).unwrap();
    let second = published(orchestrator.on_tick(tick(ContextKey::PRIMARY, 4)));

    let renders = world.renders.lock().unwrap().clone();
    assert_eq!(renders.len(), 2);
    assert_eq!(renders[0], RenderOutcome::Drawn { tiles: 0 });
    assert_eq!(
        renders[1],
        RenderOutcome::Drawn {
            tiles: first.other + first.intersection
        }
    );
    assert_eq!(first, second);
    assert_eq!(orchestrator.snapshot(ContextKey::PRIMARY).unwrap(), before);
}

#[test]
fn key_press_during_cycle_survives_for_next_cycle() {
    let (world, orchestrator) = reentrant_setup(OverlayConfig {
        button_control_show: true,
        ..OverlayConfig::default()
    });
    let hovered = ItemDescriptor::new(ItemId(4), "Scarecrow").placed_at(Tile::new(0, 0));
    world.inner.update(|state| {
        state.hovered = Some(hovered.clone());
        state.placed = vec![hovered.clone()];
    });
    *world.press_during_query.lock().unwrap() = Some(ButtonState {
        show_one_down: true,
        player_free: true,
        ..ButtonState::default()
    });

    orchestrator.on_buttons_changed(
        ContextKey::PRIMARY,
        ButtonState {
            show_all_down: true,
            player_free: true,
            ..ButtonState::default()
        },
    );
    let first = published(orchestrator.on_tick(tick(ContextKey::PRIMARY, 0)));
    assert_eq!(
        first.targeted.map(|t| t.source),
        Some(TargetSource::Hovered { show_all: true })
    );

    let triggers = orchestrator.context(ContextKey::PRIMARY).control().triggers;
    assert!(triggers.one.is_armed());
    assert!(!triggers.all.is_armed());

    let second = published(orchestrator.on_tick(tick(ContextKey::PRIMARY, 4)));
    assert_eq!(
        second.targeted.map(|t| t.source),
        Some(TargetSource::Hovered { show_all: false })
    );
    assert!(
        !orchestrator
            .context(ContextKey::PRIMARY)
            .control()
            .triggers
            .any_armed()
    );
}

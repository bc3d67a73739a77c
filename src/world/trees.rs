//! Trees — axe damage, felling into stumps, and the daily apple crop.
//!
//! `Grove` owns every tree on the farm. Systems route axe swings and new
//! days into it and mirror it into sprites; nothing else mutates a tree.

use bevy::prelude::*;
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::shared::*;

/// Axe hits a tree takes before it falls.
pub const TREE_HEALTH: u8 = 5;

/// Chance that an empty apple slot bears fruit on a new day.
pub const APPLE_CHANCE: f64 = 0.2;

/// What one axe hit yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Chop {
    pub apples: u32,
    pub wood: u32,
}

impl std::ops::AddAssign for Chop {
    fn add_assign(&mut self, other: Self) {
        self.apples += other.apples;
        self.wood += other.wood;
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    size: TreeSize,
    top_left: Vec2,
    health: u8,
    apples: Vec<bool>,
}

impl Tree {
    /// A standing tree with full health and bare branches.
    pub fn new(spawn: TreeSpawn) -> Self {
        Self {
            size: spawn.size,
            top_left: spawn.top_left,
            health: TREE_HEALTH,
            apples: vec![false; spawn.size.apple_slots().len()],
        }
    }

    pub fn size(&self) -> TreeSize {
        self.size
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Map-space area of what is standing: the whole tree, or the stump at
    /// the middle of its base.
    pub fn rect(&self) -> Rect {
        let tree = Rect::from_corners(self.top_left, self.top_left + self.size.sprite_size());
        if self.is_alive() {
            return tree;
        }
        let stump = self.size.stump_size();
        let base = Vec2::new(tree.center().x, tree.max.y);
        Rect::new(
            base.x - stump.x / 2.0,
            base.y - stump.y,
            base.x + stump.x / 2.0,
            base.y,
        )
    }

    /// The solid part the player bumps into.
    pub fn hitbox(&self) -> Rect {
        let rect = self.rect();
        let shrink = if self.is_alive() {
            Vec2::new(rect.width() * 0.2, rect.height() * 0.75)
        } else {
            Vec2::new(10.0, rect.height() * 0.6)
        };
        Rect::from_center_size(rect.center(), rect.size() - shrink)
    }

    pub fn apple_count(&self) -> usize {
        self.apples.iter().filter(|&&hanging| hanging).count()
    }

    /// Map-space top-left corners of the hanging apples.
    pub fn apples(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.size
            .apple_slots()
            .iter()
            .zip(&self.apples)
            .filter(|(_, &hanging)| hanging)
            .map(|(&slot, _)| self.top_left + slot)
    }

    /// One axe hit. Knocks a random apple loose; the last hit fells the
    /// tree and drops its wood. Stumps ignore the axe.
    pub fn chop(&mut self, rng: &mut impl Rng) -> Option<Chop> {
        if !self.is_alive() {
            return None;
        }

        self.health -= 1;
        let mut chop = Chop::default();

        let hanging = (0..self.apples.len()).filter(|&i| self.apples[i]).choose(rng);
        if let Some(slot) = hanging {
            self.apples[slot] = false;
            chop.apples = 1;
        }

        if !self.is_alive() {
            self.apples.fill(false);
            chop.wood = self.size.wood();
        }
        Some(chop)
    }

    /// Drop yesterday's apples and grow a fresh crop. Stumps stay bare.
    pub fn regrow_apples(&mut self, rng: &mut impl Rng) {
        let alive = self.is_alive();
        for slot in self.apples.iter_mut() {
            *slot = alive && rng.gen_bool(APPLE_CHANCE);
        }
    }
}

/// Every tree on the farm, in map order.
#[derive(Resource, Debug, Clone, Default)]
pub struct Grove {
    trees: Vec<Tree>,
}

impl Grove {
    /// Plant the map's trees and give them their first apples.
    pub fn new(spawns: &[TreeSpawn], rng: &mut impl Rng) -> Self {
        let mut grove = Self {
            trees: spawns.iter().copied().map(Tree::new).collect(),
        };
        grove.regrow(rng);
        grove
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// Swing the axe at `point`. Every standing tree under it takes a hit;
    /// returns the combined yield, or `None` if nothing was hit.
    pub fn chop_at(&mut self, point: Vec2, rng: &mut impl Rng) -> Option<Chop> {
        let mut total: Option<Chop> = None;
        for tree in self.trees.iter_mut().filter(|t| t.rect().contains(point)) {
            if let Some(chop) = tree.chop(rng) {
                *total.get_or_insert_with(Chop::default) += chop;
            }
        }
        total
    }

    pub fn regrow(&mut self, rng: &mut impl Rng) {
        for tree in self.trees.iter_mut() {
            tree.regrow_apples(rng);
        }
    }
}

/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG; `tick` takes
/// the per-frame input facts and elapsed seconds and never touches the clock
/// or the keyboard itself.

use rand::Rng;

use crate::entities::{
    Centipede, Footprint, GameState, GameStatus, InputState, Laser, Mushroom, Ship, Spider,
    segment_bounds, BOTTOM_BUFFER, CENTIPEDE_SPEED, FOLLOW_DISTANCE, LASER_SPEED, LASER_WIDTH,
    MUSHROOM_COUNT, SCORE_BODY, SCORE_HEAD, SCORE_MUSHROOM, SCORE_SPIDER, SCREEN_HEIGHT,
    SCREEN_WIDTH, SEGMENT_SIZE, SHIP_HEIGHT, SHIP_SPEED, SHIP_WIDTH, SHOT_INTERVAL,
    SPIDER_HEIGHT, SPIDER_RESPAWN_DELAY, SPIDER_SPEED, SPIDER_WIDTH, STARTING_LIVES,
    STARTING_SEGMENTS, TOP_BUFFER, Y_DISPLACEMENT,
};
use crate::geom::{distance, Rect, Vec2};

// ── Hit outcomes ─────────────────────────────────────────────────────────────

/// What a laser did to a centipede.
#[derive(Clone, Debug)]
pub enum CentipedeHit {
    Miss,
    /// A head or tail segment was removed.  The centipede may now be empty,
    /// in which case the caller must drop it from the collection.
    Shrunk,
    /// An interior segment was consumed.  The caller must drop the original
    /// centipede and append the returned halves once its scan completes.
    Split(Vec<Centipede>),
}

/// What a laser did to a mushroom it overlapped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MushroomHit {
    /// First hit: the mushroom shrinks but stays.
    Damaged,
    /// Second hit: the caller removes the mushroom and awards the points.
    Destroyed,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fixed respawn point for the ship, centred inside the bottom buffer band.
pub fn ship_spawn() -> Vec2 {
    Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - BOTTOM_BUFFER + 20.0)
}

/// Build the initial game state.  All randomness (mushroom layout, spider
/// spawn) comes through `rng` so callers control determinism.
pub fn init_state(rng: &mut impl Rng) -> GameState {
    // One full-length centipede entering from the top-left corner, body
    // trailing straight down behind the head.
    let segments: Vec<Vec2> = (0..STARTING_SEGMENTS)
        .map(|i| Vec2::new(0.0, i as f32 * FOLLOW_DISTANCE))
        .collect();
    let centipede = Centipede {
        segments,
        direction: Vec2::new(1.0, 0.0),
        descending: true,
    };

    // Random, deliberately non-deduplicated mushroom placement inside the
    // band between the two buffer zones.  Overlaps are allowed.
    let mushrooms: Vec<Mushroom> = (0..MUSHROOM_COUNT)
        .map(|_| Mushroom {
            pos: Vec2::new(
                rng.gen_range(0.0..SCREEN_WIDTH - 100.0),
                rng.gen_range(TOP_BUFFER..SCREEN_HEIGHT - BOTTOM_BUFFER),
            ),
            damaged: false,
        })
        .collect();

    let spider = Spider {
        pos: Vec2::new(
            rng.gen_range(0.0..SCREEN_WIDTH),
            rng.gen_range(0.0..SCREEN_HEIGHT / 2.0),
        ),
        direction: Vec2::new(
            if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
        ),
        alive: true,
        time_since_death: 0.0,
    };

    GameState {
        centipedes: vec![centipede],
        mushrooms,
        lasers: Vec::new(),
        spider,
        ship: Ship {
            pos: ship_spawn(),
            lives: STARTING_LIVES,
        },
        score: 0,
        status: GameStatus::Playing,
        shot_cooldown: 0.0,
    }
}

// ── Centipede ────────────────────────────────────────────────────────────────

/// Displace the head one step in the current vertical sense, then flip the
/// sense at the top and bottom of the field.
fn step_vertically(c: &mut Centipede) {
    let dy = if c.descending {
        Y_DISPLACEMENT
    } else {
        -Y_DISPLACEMENT
    };
    c.segments[0].y += dy;

    if c.segments[0].y <= 0.0 {
        c.descending = true;
    } else if c.segments[0].y + SEGMENT_SIZE + Y_DISPLACEMENT >= SCREEN_HEIGHT {
        c.descending = false;
    }
}

/// Reverse at the side walls, stepping vertically in the process.
fn bounce_off_walls(c: &mut Centipede) {
    let head = c.segments[0];
    if head.x <= 0.0 {
        c.direction = Vec2::new(1.0, 0.0);
        step_vertically(c);
    } else if head.x + SEGMENT_SIZE >= SCREEN_WIDTH {
        c.direction = Vec2::new(-1.0, 0.0);
        step_vertically(c);
    }
}

/// Move the head along its direction, bounce it off the side walls, then let
/// every body segment chase its predecessor.  A follower only moves when its
/// gap exceeds `FOLLOW_DISTANCE`, which produces the lag-chain snake effect —
/// no segment ever travels farther than `CENTIPEDE_SPEED * dt` in one step.
pub fn advance_centipede(c: &mut Centipede, dt: f32) {
    if c.segments.is_empty() {
        return;
    }
    let step = CENTIPEDE_SPEED * dt;
    c.segments[0] += c.direction * step;
    bounce_off_walls(c);

    for i in 1..c.segments.len() {
        let target = c.segments[i - 1];
        if distance(target, c.segments[i]) > FOLLOW_DISTANCE {
            let dir = (target - c.segments[i]).normalize();
            c.segments[i] += dir * step;
        }
    }
}

/// Head overlap with a mushroom reverses the horizontal direction and steps
/// vertically, same as a wall bounce.  First overlapping mushroom only.
pub fn centipede_mushroom_collision(c: &mut Centipede, mushrooms: &[Mushroom]) {
    let head = segment_bounds(c.segments[0]);
    if mushrooms.iter().any(|m| head.intersects(&m.bounds())) {
        c.direction.x = -c.direction.x;
        step_vertically(c);
    }
}

/// Resolve a laser against this centipede, scanning segments head to tail.
///
/// * Head hit: the head is removed (+100) and the next segment takes over.
/// * Tail hit: the tail is removed (+10).
/// * Interior hit at `i`: the segment is consumed (+10) and the centipede
///   splits — segments before `i` keep the direction, segments after `i`
///   reverse it.  Both halves start descending.
pub fn centipede_laser_hit(
    c: &mut Centipede,
    shot: &Rect,
    score: &mut u32,
) -> CentipedeHit {
    let Some(i) = c
        .segments
        .iter()
        .position(|&s| segment_bounds(s).intersects(shot))
    else {
        return CentipedeHit::Miss;
    };

    if i == 0 {
        c.segments.remove(0);
        *score += SCORE_HEAD;
        CentipedeHit::Shrunk
    } else if i == c.segments.len() - 1 {
        c.segments.pop();
        *score += SCORE_BODY;
        CentipedeHit::Shrunk
    } else {
        let front = c.segments[..i].to_vec();
        let back = c.segments[i + 1..].to_vec();
        *score += SCORE_BODY;

        let mut halves = Vec::new();
        if !front.is_empty() {
            halves.push(Centipede {
                segments: front,
                direction: c.direction,
                descending: true,
            });
        }
        if !back.is_empty() {
            halves.push(Centipede {
                segments: back,
                direction: -c.direction,
                descending: true,
            });
        }
        CentipedeHit::Split(halves)
    }
}

/// True if any segment touches the ship.
pub fn centipede_ship_collision(c: &Centipede, ship_box: &Rect) -> bool {
    c.segments
        .iter()
        .any(|&s| segment_bounds(s).intersects(ship_box))
}

// ── Spider ───────────────────────────────────────────────────────────────────

/// Billiard-style bounce: each axis reverses independently at the edges.
pub fn advance_spider(s: &mut Spider, dt: f32) {
    if !s.alive {
        return;
    }
    s.pos += s.direction * (SPIDER_SPEED * dt);

    if s.pos.x <= 0.0 || s.pos.x + SPIDER_WIDTH >= SCREEN_WIDTH {
        s.direction.x = -s.direction.x;
    }
    if s.pos.y <= 0.0 || s.pos.y + SPIDER_HEIGHT >= SCREEN_HEIGHT {
        s.direction.y = -s.direction.y;
    }
}

/// A live spider tramples the first mushroom it overlaps.
pub fn spider_mushroom_collision(s: &Spider, mushrooms: &mut Vec<Mushroom>) -> bool {
    if !s.alive {
        return false;
    }
    let spider_box = s.bounds();
    if let Some(i) = mushrooms
        .iter()
        .position(|m| spider_box.intersects(&m.bounds()))
    {
        mushrooms.remove(i);
        true
    } else {
        false
    }
}

/// Kill the spider and start its respawn timer.
pub fn spider_laser_hit(s: &mut Spider, shot: &Rect, score: &mut u32) -> bool {
    if s.alive && s.bounds().intersects(shot) {
        s.alive = false;
        s.time_since_death = 0.0;
        *score += SCORE_SPIDER;
        true
    } else {
        false
    }
}

// ── Mushroom ─────────────────────────────────────────────────────────────────

/// Two hits to kill: the first shrinks, the second destroys.
pub fn mushroom_laser_hit(m: &mut Mushroom) -> MushroomHit {
    if m.damaged {
        MushroomHit::Destroyed
    } else {
        m.damaged = true;
        MushroomHit::Damaged
    }
}

// ── Laser ────────────────────────────────────────────────────────────────────

/// A laser expires once it leaves the top of the visible area.
pub fn laser_expired(l: &Laser) -> bool {
    l.pos.y < 0.0
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

fn lose_life(state: &mut GameState) {
    state.ship.lives = state.ship.lives.saturating_sub(1);
    state.ship.pos = ship_spawn();
    if state.ship.lives == 0 {
        state.status = GameStatus::GameOver;
    }
}

/// Advance the simulation by one frame of `dt` seconds.
///
/// Phase order matters for determinism and mirrors the entity lifecycle:
/// movement first, then projectile resolution, then ship contact.  Once the
/// status leaves `Playing` the state is frozen.
pub fn tick(state: &GameState, input: &InputState, dt: f32) -> GameState {
    let mut next = state.clone();
    if next.status != GameStatus::Playing {
        return next;
    }

    // 1. Advance every centipede; drop any that ran out of segments.
    for c in &mut next.centipedes {
        advance_centipede(c, dt);
    }
    next.centipedes.retain(|c| !c.segments.is_empty());

    // 2. All centipedes gone → the player wins; nothing else runs this tick.
    if next.centipedes.is_empty() {
        next.status = GameStatus::Won;
        return next;
    }

    // 3. Centipede heads bounce off mushrooms.
    for c in &mut next.centipedes {
        centipede_mushroom_collision(c, &next.mushrooms);
    }

    // 4. Spider: respawn timer, movement, mushroom trampling.
    if !next.spider.alive {
        next.spider.time_since_death += dt;
        if next.spider.time_since_death >= SPIDER_RESPAWN_DELAY {
            next.spider.alive = true;
        }
    }
    advance_spider(&mut next.spider, dt);
    spider_mushroom_collision(&next.spider, &mut next.mushrooms);

    // 5. Ship movement, confined to the bottom buffer band.
    let step = SHIP_SPEED * dt;
    if input.up && next.ship.pos.y > SCREEN_HEIGHT - BOTTOM_BUFFER {
        next.ship.pos.y -= step;
    }
    if input.down && next.ship.pos.y < SCREEN_HEIGHT - SHIP_HEIGHT {
        next.ship.pos.y += step;
    }
    if input.left && next.ship.pos.x > 0.0 {
        next.ship.pos.x -= step;
    }
    if input.right && next.ship.pos.x < SCREEN_WIDTH - SHIP_WIDTH {
        next.ship.pos.x += step;
    }

    // 6. Fire, rate-limited by the cooldown.
    next.shot_cooldown = (next.shot_cooldown - dt).max(0.0);
    if input.fire && next.shot_cooldown <= 0.0 {
        let x = next.ship.pos.x + SHIP_WIDTH / 2.0 - LASER_WIDTH / 2.0;
        next.lasers.push(Laser {
            pos: Vec2::new(x, next.ship.pos.y),
        });
        next.shot_cooldown = SHOT_INTERVAL;
    }

    // 7. Advance lasers; drop the ones that left the screen.
    for l in &mut next.lasers {
        l.pos.y -= LASER_SPEED * dt;
    }
    next.lasers.retain(|l| !laser_expired(l));

    // 8. Lasers vs mushrooms — the first overlap consumes the laser.
    let mut li = 0;
    while li < next.lasers.len() {
        let shot = next.lasers[li].bounds();
        if let Some(mi) = next
            .mushrooms
            .iter()
            .position(|m| shot.intersects(&m.bounds()))
        {
            match mushroom_laser_hit(&mut next.mushrooms[mi]) {
                MushroomHit::Damaged => {}
                MushroomHit::Destroyed => {
                    next.mushrooms.remove(mi);
                    next.score += SCORE_MUSHROOM;
                }
            }
            next.lasers.remove(li);
        } else {
            li += 1;
        }
    }

    // 9. Lasers vs centipedes.  Split halves are staged and appended only
    //    after the scan over the existing centipedes completes, so the
    //    iteration never observes its own insertions.
    let mut li = 0;
    while li < next.lasers.len() {
        let shot = next.lasers[li].bounds();
        let mut consumed = false;
        let mut staged: Vec<Centipede> = Vec::new();

        let mut ci = 0;
        while ci < next.centipedes.len() {
            match centipede_laser_hit(&mut next.centipedes[ci], &shot, &mut next.score) {
                CentipedeHit::Miss => ci += 1,
                CentipedeHit::Shrunk => {
                    if next.centipedes[ci].segments.is_empty() {
                        next.centipedes.remove(ci);
                    }
                    consumed = true;
                    break;
                }
                CentipedeHit::Split(halves) => {
                    next.centipedes.remove(ci);
                    staged = halves;
                    consumed = true;
                    break;
                }
            }
        }
        next.centipedes.append(&mut staged);

        if consumed {
            next.lasers.remove(li);
        } else {
            li += 1;
        }
    }

    // 10. Lasers vs spider.
    let mut li = 0;
    while li < next.lasers.len() {
        let shot = next.lasers[li].bounds();
        if spider_laser_hit(&mut next.spider, &shot, &mut next.score) {
            next.lasers.remove(li);
        } else {
            li += 1;
        }
    }

    // 11. Centipedes vs ship: any contact costs a life and respawns the ship.
    let ship_box = next.ship.bounds();
    let rammed = next
        .centipedes
        .iter()
        .any(|c| centipede_ship_collision(c, &ship_box));
    if rammed {
        lose_life(&mut next);
    }

    // 12. Spider vs ship, same effect.
    let stung = next.spider.alive && next.spider.bounds().intersects(&next.ship.bounds());
    if stung {
        lose_life(&mut next);
    }

    next
}

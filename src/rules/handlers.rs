//! Action handlers: the four player-driven state transitions.
//!
//! Turn states:
//!
//! ```text
//! awaiting-action --draw--> holding-drawn-card --play drawn | pass--> next player
//! ```
//!
//! Declaring low hand is a side transition open to the player on turn.
//! Every precondition is checked before the first mutation; a handler either
//! completes the transition or returns the rejection.

use tracing::{debug, info, warn};

use super::engine::Outcome;
use super::turn::{advance, apply_card_effect};
use super::validator::check_play;
use crate::cards::{CardId, Color};
use crate::core::action::Action;
use crate::core::config::{GameConfig, ShortfallPolicy};
use crate::core::error::{EngineError, InvalidAction};
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// Seat of `player` if they may act right now.
fn acting_seat(state: &GameState, player: PlayerId) -> Result<usize, InvalidAction> {
    if state.is_over() {
        return Err(InvalidAction::GameOver);
    }
    let seat = state.seat_of(player).ok_or(InvalidAction::UnknownPlayer(player))?;
    if seat != state.current {
        return Err(InvalidAction::NotYourTurn(player));
    }
    Ok(seat)
}

/// Move up to `count` cards from the piles into a seat's hand.
///
/// Returns how many cards were actually dealt.
pub(crate) fn draw_into_hand(
    state: &mut GameState,
    seat: usize,
    count: usize,
    policy: ShortfallPolicy,
) -> Result<usize, EngineError> {
    let dealt = state.piles.deal(count, policy, &mut state.rng)?;
    let n = dealt.len();
    state.players[seat].hand.extend(dealt);
    Ok(n)
}

/// Settle a pending draw stack against the player now on turn.
///
/// If they hold a draw card the stack waits for them to stack or draw.
/// Otherwise they take the whole stack at once and lose their turn.
pub(crate) fn resolve_pending_stack(
    state: &mut GameState,
    config: &GameConfig,
) -> Result<(), EngineError> {
    if state.draw_stack == 0 || state.players.is_empty() {
        return Ok(());
    }

    let seat = state.current;
    if state.players[seat].holds_draw_card() {
        debug!(player = %state.players[seat].id, draw_stack = state.draw_stack, "Stack waits for answer");
        return Ok(());
    }

    let stack = state.draw_stack;
    let drawn = draw_into_hand(state, seat, stack as usize, config.shortfall)?;
    let victim = state.players[seat].id;
    state.players[seat].declared_low_hand = false;
    debug!(player = %victim, drawn, "Forced to absorb draw stack");

    state.last_action = format!("{}; {victim} drew {drawn}", state.last_action);
    state.draw_stack = 0;
    advance(state);
    Ok(())
}

/// Play a card from hand, or the card drawn this turn.
pub fn play_card(
    state: &mut GameState,
    config: &GameConfig,
    player: PlayerId,
    card_id: CardId,
    chosen_color: Option<Color>,
) -> Result<Outcome, EngineError> {
    let seat = acting_seat(state, player)?;

    let from_drawn = state.drawn_card.is_some_and(|c| c.id == card_id);
    let card = if from_drawn {
        state.drawn_card.ok_or(InvalidAction::CardNotFound(card_id))?
    } else {
        let card = *state.players[seat]
            .find_card(card_id)
            .ok_or(InvalidAction::CardNotFound(card_id))?;
        if state.drawn_card.is_some() {
            return Err(InvalidAction::MustPlayDrawnCard.into());
        }
        card
    };

    let color = check_play(
        &card,
        chosen_color,
        state.top_card(),
        state.active_color,
        state.draw_stack > 0,
    )?;

    // Validated; mutation starts here.
    if from_drawn {
        state.drawn_card = None;
    } else {
        state.players[seat].take_card(card_id);
    }

    let mut played = card;
    if played.is_wild() {
        played.bind_color(color);
    }
    state.piles.discard(played);
    state.active_color = color;
    state.record_action(
        player,
        Action::PlayCard {
            card: card_id,
            chosen_color,
        },
    );
    state.last_action = format!("{player} played {played}");
    debug!(%player, card = %played, active_color = %color, "Card played");

    if state.players[seat].hand.is_empty() {
        state.winner = Some(player);
        state.last_action = format!("{player} played {played} and won");
        info!(%player, "Hand emptied, game over");
        return Ok(Outcome::GameOver { winner: player });
    }

    let hand_size = state.players[seat].hand_size();
    if !from_drawn && hand_size == 1 && !state.players[seat].declared_low_hand {
        let drawn = draw_into_hand(state, seat, config.catch_penalty, config.shortfall)?;
        state.last_action = format!("{}; caught without declaring, drew {drawn}", state.last_action);
        debug!(%player, drawn, "Catch penalty");
    }
    if state.players[seat].hand_size() > 1 {
        state.players[seat].declared_low_hand = false;
    }

    let skip = apply_card_effect(state, card.face);
    advance(state);
    if skip {
        advance(state);
    }
    resolve_pending_stack(state, config)?;

    state.drawn_card = None;
    Ok(Outcome::Continue)
}

/// Draw a card, or take the whole pending draw stack.
pub fn draw_card(
    state: &mut GameState,
    config: &GameConfig,
    player: PlayerId,
) -> Result<Outcome, EngineError> {
    let seat = acting_seat(state, player)?;

    if state.draw_stack > 0 {
        let stack = state.draw_stack;
        let drawn = draw_into_hand(state, seat, stack as usize, config.shortfall)?;
        state.players[seat].declared_low_hand = false;
        state.draw_stack = 0;
        state.record_action(player, Action::DrawCard);
        state.last_action = format!("{player} drew {drawn} penalty cards");
        debug!(%player, drawn, "Absorbed draw stack");
        advance(state);
        return Ok(Outcome::Continue);
    }

    if state.drawn_card.is_some() {
        return Err(InvalidAction::AlreadyHoldingDrawnCard.into());
    }

    // Both piles spent: nothing to hold, so the draw ends the turn.
    if state.piles.available() == 0 {
        state.players[seat].declared_low_hand = false;
        state.record_action(player, Action::DrawCard);
        state.last_action = format!("{player} found nothing to draw");
        warn!(%player, "Piles exhausted, turn passes");
        advance(state);
        return Ok(Outcome::Continue);
    }

    let card = state
        .piles
        .deal(1, config.shortfall, &mut state.rng)?
        .into_iter()
        .next()
        .ok_or(EngineError::InsufficientCards {
            requested: 1,
            available: 0,
        })?;
    state.drawn_card = Some(card);
    state.players[seat].declared_low_hand = false;
    state.record_action(player, Action::DrawCard);
    state.last_action = format!("{player} drew a card");
    debug!(%player, "Voluntary draw");
    Ok(Outcome::Continue)
}

/// Keep the drawn card and end the turn.
pub fn pass_turn(state: &mut GameState, player: PlayerId) -> Result<Outcome, EngineError> {
    let seat = acting_seat(state, player)?;

    let Some(card) = state.drawn_card else {
        return Err(InvalidAction::NoDrawnCard.into());
    };
    if state.draw_stack > 0 {
        return Err(InvalidAction::PenaltyPending(state.draw_stack).into());
    }

    let seated = &mut state.players[seat];
    seated.hand.push_back(card);
    seated.declared_low_hand = false;
    state.drawn_card = None;
    state.record_action(player, Action::PassTurn);
    state.last_action = format!("{player} passed");
    debug!(%player, "Turn passed");
    advance(state);
    Ok(Outcome::Continue)
}

/// Announce a low hand ahead of playing down to one card.
pub fn declare_low_hand(
    state: &mut GameState,
    config: &GameConfig,
    player: PlayerId,
) -> Result<Outcome, EngineError> {
    let seat = acting_seat(state, player)?;

    let size = state.players[seat].hand_size();
    if size > config.low_hand_limit {
        return Err(InvalidAction::TooManyCardsToDeclare(size).into());
    }

    state.players[seat].declared_low_hand = true;
    state.record_action(player, Action::DeclareLowHand);
    state.last_action = format!("{player} declared a low hand");
    debug!(%player, hand = size, "Low hand declared");
    Ok(Outcome::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{build_canonical_deck, Card, Face};
    use crate::core::player::Player;
    use crate::core::rng::GameRng;
    use crate::zones::Piles;
    use im::Vector;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    /// Two seats with the given hands over the rest of the canonical deck.
    fn table(hands: &[&[(Option<Color>, Face)]], top: (Option<Color>, Face)) -> GameState {
        let mut deck = build_canonical_deck();
        let mut take = |color: Option<Color>, face: Face| -> Card {
            let pos = deck
                .iter()
                .position(|c| c.color == color && c.face == face)
                .expect("card available");
            deck.remove(pos)
        };

        let hands: Vec<Vector<Card>> = hands
            .iter()
            .map(|hand| hand.iter().map(|&(c, f)| take(c, f)).collect())
            .collect();
        let top = take(top.0, top.1);

        let mut piles = Piles::new(deck);
        piles.discard(top);
        let mut state = GameState::new(piles, GameRng::new(3));
        state.active_color = top.color.unwrap_or(Color::Red);
        for (i, hand) in hands.into_iter().enumerate() {
            state.players.push_back(Player::with_hand(PlayerId::new(i as u32), hand));
        }
        state
    }

    fn card_in_hand(state: &GameState, seat: usize, face: Face) -> CardId {
        state.players[seat].hand.iter().find(|c| c.face == face).unwrap().id
    }

    #[test]
    fn test_play_matching_card_advances() {
        let config = GameConfig::default();
        let r = Some(Color::Red);
        let mut state = table(
            &[&[(r, Face::Number(4)), (r, Face::Number(6)), (r, Face::Number(7))], &[(r, Face::Number(1))]],
            (r, Face::Number(9)),
        );

        let card = card_in_hand(&state, 0, Face::Number(4));
        let outcome = play_card(&mut state, &config, P0, card, None).unwrap();

        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(state.top_card().map(|c| c.id), Some(card));
        assert_eq!(state.current, 1);
        assert_eq!(state.players[0].hand_size(), 2);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.audit_cards(), Ok(()));
    }

    #[test]
    fn test_play_rejections_leave_state() {
        let config = GameConfig::default();
        let r = Some(Color::Red);
        let b = Some(Color::Blue);
        let mut state = table(
            &[&[(b, Face::Number(4)), (None, Face::Wild), (r, Face::Number(7))], &[(r, Face::Number(1))]],
            (r, Face::Number(9)),
        );
        let before = state.clone();

        let blue = card_in_hand(&state, 0, Face::Number(4));
        let wild = card_in_hand(&state, 0, Face::Wild);
        let foreign = state.players[1].hand[0].id;

        let err = play_card(&mut state, &config, P0, blue, None).unwrap_err();
        assert_eq!(err.as_invalid_action(), Some(&InvalidAction::IllegalMove(blue)));

        let err = play_card(&mut state, &config, P0, wild, None).unwrap_err();
        assert_eq!(err.as_invalid_action(), Some(&InvalidAction::MissingColor));

        let err = play_card(&mut state, &config, P0, foreign, None).unwrap_err();
        assert_eq!(err.as_invalid_action(), Some(&InvalidAction::CardNotFound(foreign)));

        let err = play_card(&mut state, &config, P1, foreign, None).unwrap_err();
        assert_eq!(err.as_invalid_action(), Some(&InvalidAction::NotYourTurn(P1)));

        let err = play_card(&mut state, &config, PlayerId::new(9), foreign, None).unwrap_err();
        assert_eq!(
            err.as_invalid_action(),
            Some(&InvalidAction::UnknownPlayer(PlayerId::new(9)))
        );

        assert_eq!(state, before);
    }

    #[test]
    fn test_wild_binds_chosen_color() {
        let config = GameConfig::default();
        let r = Some(Color::Red);
        let mut state = table(
            &[&[(None, Face::Wild), (r, Face::Number(6)), (r, Face::Number(7))], &[(r, Face::Number(1))]],
            (r, Face::Number(9)),
        );

        let wild = card_in_hand(&state, 0, Face::Wild);
        play_card(&mut state, &config, P0, wild, Some(Color::Green)).unwrap();

        assert_eq!(state.active_color, Color::Green);
        assert_eq!(state.top_card().and_then(|c| c.color), Some(Color::Green));
    }

    #[test]
    fn test_catch_penalty_without_declaration() {
        let config = GameConfig::default();
        let r = Some(Color::Red);
        let mut state = table(
            &[&[(r, Face::Number(4)), (r, Face::Number(6))], &[(r, Face::Number(1))]],
            (r, Face::Number(9)),
        );

        let card = card_in_hand(&state, 0, Face::Number(4));
        play_card(&mut state, &config, P0, card, None).unwrap();

        assert_eq!(state.players[0].hand_size(), 3);
        assert!(!state.players[0].declared_low_hand);
    }

    #[test]
    fn test_declaration_prevents_catch_penalty() {
        let config = GameConfig::default();
        let r = Some(Color::Red);
        let mut state = table(
            &[&[(r, Face::Number(4)), (r, Face::Number(6))], &[(r, Face::Number(1))]],
            (r, Face::Number(9)),
        );

        declare_low_hand(&mut state, &config, P0).unwrap();
        let card = card_in_hand(&state, 0, Face::Number(4));
        play_card(&mut state, &config, P0, card, None).unwrap();

        assert_eq!(state.players[0].hand_size(), 1);
        assert!(state.players[0].declared_low_hand);
    }

    #[test]
    fn test_declaration_needs_small_hand() {
        let config = GameConfig::default();
        let r = Some(Color::Red);
        let mut state = table(
            &[&[(r, Face::Number(4)), (r, Face::Number(6)), (r, Face::Number(7))], &[(r, Face::Number(1))]],
            (r, Face::Number(9)),
        );

        let err = declare_low_hand(&mut state, &config, P0).unwrap_err();
        assert_eq!(err.as_invalid_action(), Some(&InvalidAction::TooManyCardsToDeclare(3)));

        let err = declare_low_hand(&mut state, &config, P1).unwrap_err();
        assert_eq!(err.as_invalid_action(), Some(&InvalidAction::NotYourTurn(P1)));
    }

    #[test]
    fn test_draw_then_pass() {
        let config = GameConfig::default();
        let r = Some(Color::Red);
        let b = Some(Color::Blue);
        let mut state = table(&[&[(b, Face::Number(4))], &[(b, Face::Number(1))]], (r, Face::Number(9)));
        state.players[0].declared_low_hand = true;

        draw_card(&mut state, &config, P0).unwrap();
        assert!(state.drawn_card.is_some());
        assert_eq!(state.current, 0);
        assert!(!state.players[0].declared_low_hand);

        let err = draw_card(&mut state, &config, P0).unwrap_err();
        assert_eq!(err.as_invalid_action(), Some(&InvalidAction::AlreadyHoldingDrawnCard));

        pass_turn(&mut state, P0).unwrap();
        assert!(state.drawn_card.is_none());
        assert_eq!(state.players[0].hand_size(), 2);
        assert_eq!(state.current, 1);
        assert_eq!(state.audit_cards(), Ok(()));
    }

    #[test]
    fn test_draw_from_spent_piles_ends_turn() {
        let r = Some(Color::Red);
        let b = Some(Color::Blue);

        for policy in [ShortfallPolicy::Reject, ShortfallPolicy::Lenient] {
            let config = GameConfig::default().with_shortfall(policy);
            let mut state = table(&[&[(b, Face::Number(1))], &[(b, Face::Number(2))]], (r, Face::Number(9)));
            let hoard = std::mem::take(&mut state.piles.deck);
            state.players[1].hand.extend(hoard);
            assert_eq!(state.piles.available(), 0);

            draw_card(&mut state, &config, P0).unwrap();

            assert!(state.drawn_card.is_none(), "{policy:?}");
            assert_eq!(state.current, 1, "{policy:?}");
            assert_eq!(state.players[0].hand_size(), 1);
            assert_eq!(state.history.len(), 1);
            assert_eq!(state.audit_cards(), Ok(()));
        }
    }

    #[test]
    fn test_pass_without_drawn_card() {
        let r = Some(Color::Red);
        let mut state = table(&[&[(r, Face::Number(4))], &[(r, Face::Number(1))]], (r, Face::Number(9)));

        let err = pass_turn(&mut state, P0).unwrap_err();
        assert_eq!(err.as_invalid_action(), Some(&InvalidAction::NoDrawnCard));
    }

    #[test]
    fn test_holding_drawn_card_blocks_hand_plays() {
        let config = GameConfig::default();
        let r = Some(Color::Red);
        let mut state = table(
            &[&[(r, Face::Number(4)), (r, Face::Number(5))], &[(r, Face::Number(1))]],
            (r, Face::Number(9)),
        );

        draw_card(&mut state, &config, P0).unwrap();
        let in_hand = card_in_hand(&state, 0, Face::Number(4));
        let err = play_card(&mut state, &config, P0, in_hand, None).unwrap_err();
        assert_eq!(err.as_invalid_action(), Some(&InvalidAction::MustPlayDrawnCard));
    }

    #[test]
    fn test_draw_absorbs_stack() {
        let config = GameConfig::default();
        let r = Some(Color::Red);
        let mut state = table(
            &[&[(r, Face::DrawTwo), (r, Face::Number(5))], &[(r, Face::Number(1))]],
            (r, Face::DrawTwo),
        );
        state.draw_stack = 2;

        draw_card(&mut state, &config, P0).unwrap();
        assert_eq!(state.players[0].hand_size(), 4);
        assert_eq!(state.draw_stack, 0);
        assert!(state.drawn_card.is_none());
        assert_eq!(state.current, 1);
    }

    #[test]
    fn test_draw_two_forces_draw_on_unarmed_player() {
        let config = GameConfig::default();
        let r = Some(Color::Red);
        let mut state = table(
            &[
                &[(r, Face::DrawTwo), (r, Face::Number(5)), (r, Face::Number(6))],
                &[(r, Face::Number(1))],
                &[(r, Face::Number(2))],
            ],
            (r, Face::Number(9)),
        );

        let card = card_in_hand(&state, 0, Face::DrawTwo);
        play_card(&mut state, &config, P0, card, None).unwrap();

        assert_eq!(state.players[1].hand_size(), 3);
        assert_eq!(state.draw_stack, 0);
        assert_eq!(state.current, 2);
    }

    #[test]
    fn test_winning_play_stops_processing() {
        let config = GameConfig::default();
        let r = Some(Color::Red);
        let mut state = table(&[&[(r, Face::DrawTwo)], &[(r, Face::Number(1))]], (r, Face::Number(9)));

        let card = card_in_hand(&state, 0, Face::DrawTwo);
        let outcome = play_card(&mut state, &config, P0, card, None).unwrap();

        assert_eq!(outcome, Outcome::GameOver { winner: P0 });
        assert_eq!(state.winner, Some(P0));
        assert_eq!(state.draw_stack, 0);
        assert_eq!(state.current, 0);

        let err = draw_card(&mut state, &config, P1).unwrap_err();
        assert_eq!(err.as_invalid_action(), Some(&InvalidAction::GameOver));
    }
}

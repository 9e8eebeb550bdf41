use roskis::config::GameConfig;
use roskis::pool::Scripted;
use roskis::rules::{is_stuck, placeable_boxes};
use roskis::session::{Session, SessionEvent};
use roskis::state::{Outcome, Status};

fn permutations(items: &[u16]) -> Vec<Vec<u16>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for (i, &first) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, first);
            out.push(tail);
        }
    }
    out
}

#[test]
fn every_draw_order_of_five_numbers_is_a_perfect_game() {
    let orders = permutations(&[1, 2, 3, 4, 5]);
    assert_eq!(orders.len(), 120);
    for order in orders {
        let mut session = Session::with_source(Scripted::new(order.iter().copied()));
        session.start(GameConfig::try_new(5, 5).unwrap());
        for &expected in &order {
            let state = session.state();
            assert_eq!(state.current_number(), Some(expected), "order {order:?}");
            assert!(!is_stuck(state));
            // With exactly as many numbers as boxes, each has one home.
            let options = placeable_boxes(state, expected);
            assert_eq!(options, vec![usize::from(expected - 1)], "order {order:?}");
            session.place(options[0]).unwrap();
        }
        assert_eq!(session.status(), Status::WonPerfect, "order {order:?}");
        assert!(session.state().trash().is_empty());
        let events = session.drain_events();
        assert_eq!(events.last(), Some(&SessionEvent::SessionEnded(Outcome::Perfect)));
    }
}

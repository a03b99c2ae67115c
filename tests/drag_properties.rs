use boardview_core::{
    ActiveDrag, Board, BoardId, BoardStore, CardId, DragEngine, DragEvent, DragId, DragState,
    DropTarget, ListId, Mutation, Rect, RectCollisions,
};
use proptest::prelude::*;

const LISTS: usize = 4;

fn board_from(sizes: &[usize]) -> Board {
    let mut board = Board::new(BoardId::new("prop"), "Properties".to_string());
    let mut next = 0;
    for (i, size) in sizes.iter().enumerate() {
        let list = ListId::new(format!("L{}", i));
        board.list_order.push(list.clone());
        let cards = (0..*size)
            .map(|_| {
                next += 1;
                CardId::new(format!("c{}", next))
            })
            .collect();
        board.lists.insert(list, cards);
    }
    board
}

/// One step of a drag, expressed as indices into the current board
#[derive(Debug, Clone)]
enum Step {
    Over { target: usize, below: bool },
    End { target: usize },
    Cancel,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (0..32usize, any::<bool>()).prop_map(|(target, below)| Step::Over { target, below }),
        1 => (0..32usize).prop_map(|target| Step::End { target }),
        1 => Just(Step::Cancel),
    ]
}

/// Every card and list id on the board, lists first
fn targets(board: &Board) -> Vec<DragId> {
    let mut ids: Vec<DragId> = board.list_order.iter().cloned().map(DragId::List).collect();
    for list in &board.list_order {
        ids.extend(board.lists[list].iter().cloned().map(DragId::Card));
    }
    ids
}

fn drive(store: &mut BoardStore, engine: &DragEngine, state: &mut DragState, active: &DragId, step: &Step) {
    let all = targets(store.board());
    let target_rect = Rect::new(0.0, 100.0, 80.0, 40.0);
    let event = match step {
        Step::Over { target, below } => {
            let top = if *below { 200.0 } else { 90.0 };
            DragEvent::Over {
                active: ActiveDrag::new(active.clone(), Some(Rect::new(0.0, top, 80.0, 40.0))),
                over: Some(DropTarget::new(all[target % all.len()].clone(), target_rect)),
            }
        }
        Step::End { target } => DragEvent::End {
            active: ActiveDrag::new(active.clone(), None),
            over: Some(DropTarget::new(all[target % all.len()].clone(), target_rect)),
        },
        Step::Cancel => DragEvent::Cancel,
    };

    if let Some(mutation) = engine.handle(store.board(), state, event) {
        store
            .dispatch(mutation)
            .expect("engine produced a mutation the store rejected");
    }
}

proptest! {
    #[test]
    fn drags_preserve_board_invariants(
        sizes in proptest::collection::vec(0..5usize, LISTS),
        pick in 0..64usize,
        steps in proptest::collection::vec(step_strategy(), 1..12),
    ) {
        let board = board_from(&sizes);
        let card_total = board.card_count();
        let mut store = BoardStore::new(board);
        let engine = DragEngine::<RectCollisions>::default();
        let mut state = DragState::default();

        let all = targets(store.board());
        let active = all[pick % all.len()].clone();
        engine.handle(store.board(), &mut state, DragEvent::Start { active: active.clone() });

        for step in &steps {
            drive(&mut store, &engine, &mut state, &active, step);
            prop_assert!(store.board().validate().is_ok());
            prop_assert_eq!(store.board().card_count(), card_total);
        }
    }

    #[test]
    fn cancel_undoes_every_hover(
        sizes in proptest::collection::vec(0..5usize, LISTS),
        pick in 0..64usize,
        hovers in proptest::collection::vec((0..32usize, any::<bool>()), 0..10),
    ) {
        let board = board_from(&sizes);
        prop_assume!(board.card_count() > 0);
        let original = board.clone();
        let mut store = BoardStore::new(board);
        let engine = DragEngine::<RectCollisions>::default();
        let mut state = DragState::default();

        let cards: Vec<CardId> = original.lists.values().flatten().cloned().collect();
        let active = DragId::Card(cards[pick % cards.len()].clone());
        engine.handle(store.board(), &mut state, DragEvent::Start { active: active.clone() });

        for (target, below) in hovers {
            drive(&mut store, &engine, &mut state, &active, &Step::Over { target, below });
        }
        drive(&mut store, &engine, &mut state, &active, &Step::Cancel);

        prop_assert_eq!(store.board(), &original);
        prop_assert!(state.snapshot.is_none());
        prop_assert!(state.active_id.is_none());
    }
}

#[test]
fn start_then_cancel_leaves_board_unchanged() {
    let board = board_from(&[2, 1, 0]);
    let mut store = BoardStore::new(board.clone());
    let engine = DragEngine::<RectCollisions>::default();
    let mut state = DragState::default();

    let active = DragId::Card(CardId::new("c1"));
    engine.handle(store.board(), &mut state, DragEvent::Start { active });
    let reset = engine.handle(store.board(), &mut state, DragEvent::Cancel);

    assert!(matches!(reset, Some(Mutation::ResetLists(_))));
    store.dispatch(reset.unwrap()).unwrap();
    assert_eq!(store.board(), &board);
}

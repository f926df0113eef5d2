mod components;
mod game_state;

use common::{Disk, NR_PEGS, Peg};
use gloo_timers::future::TimeoutFuture;
use web_sys::HtmlElement;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::components::Board;
use crate::game_state::{GameAction, GameState};

/// Delay between two replayed solver moves.
const SOLVE_STEP_MS: u32 = 300;

#[function_component]
fn App() -> Html {
    let game_state = use_reducer(GameState::new);
    let display_scale = use_state(|| 1.0);
    let div_ref = use_node_ref();

    // While a replay is active, every applied move (and the initial toggle)
    // changes the dependency tuple, which schedules exactly one timer for
    // the next move. The reducer re-checks the replay state and the epoch
    // when the timer fires, so a cancel or reset in between makes the
    // in-flight timer a no-op.
    {
        let game_state = game_state.clone();
        use_effect_with(
            (game_state.epoch(), game_state.replay_progress()),
            move |&(epoch, progress)| {
                if progress.is_some() {
                    wasm_bindgen_futures::spawn_local(async move {
                        TimeoutFuture::new(SOLVE_STEP_MS).await;
                        game_state.dispatch(GameAction::ReplayTick { epoch });
                    });
                }
                || {}
            },
        );
    }

    let reset = {
        let game_state = game_state.clone();
        Callback::from(move |_| {
            log::info!("reset");
            game_state.dispatch(GameAction::Reset);
        })
    };

    let undo = game_state.can_undo().then(|| {
        let game_state = game_state.clone();
        Callback::from(move |_| game_state.dispatch(GameAction::Undo))
    });

    let redo = game_state.can_redo().then(|| {
        let game_state = game_state.clone();
        Callback::from(move |_| game_state.dispatch(GameAction::Redo))
    });

    let peg_click = {
        let game_state = game_state.clone();
        Callback::from(move |peg: Peg| game_state.dispatch(GameAction::ClickPeg { peg }))
    };

    let drag_move = {
        let game_state = game_state.clone();
        Callback::from(move |(src, dst): (Peg, Peg)| {
            log::debug!("dropping {src} onto {dst}");
            game_state.dispatch(GameAction::DragMove { src, dst });
        })
    };

    let toggle_solver = {
        let game_state = game_state.clone();
        Callback::from(move |_| game_state.dispatch(GameAction::ToggleSolve))
    };

    let window_size = use_window_size();
    let debounced_size_update = {
        let display_scale = display_scale.clone();
        let div_ref = div_ref.clone();
        use_debounce(
            move || {
                let Some(div) = div_ref.cast::<HtmlElement>() else {
                    return;
                };

                let new_scale = (window_size.0 / div.client_width() as f64)
                    .min(window_size.1 / div.client_height() as f64)
                    * 0.9;
                display_scale.set(new_scale);
            },
            200,
        )
    };
    use_memo(window_size, |_| {
        debounced_size_update.run();
        || {}
    });

    let pegs: [Vec<Disk>; NR_PEGS] =
        Peg::all().map(|peg| game_state.board().disks_on(peg).to_vec());

    html! {
        <div ref={div_ref} class="scaling-container" style={format!("transform: scale({})", *display_scale)}>
            <Board
                {pegs}
                move_count={game_state.board().move_count()}
                solving={game_state.is_solving()}
                solved={game_state.board().is_solved()}
                solve_failed={game_state.solve_failed()}
                selection={game_state.selection()}
                {peg_click}
                {drag_move}
                {reset}
                {undo}
                {redo}
                {toggle_solver}
            />
        </div>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}

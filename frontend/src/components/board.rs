use anyhow::{Context, anyhow};
use common::{Disk, NR_PEGS, Peg};
use web_sys::DragEvent;
use yew::prelude::*;
use yew_icons::{Icon, IconId};

const PX_DISK_HEIGHT: usize = 22;
const PX_DISK_BASE_WIDTH: u16 = 40;

#[derive(Properties, PartialEq)]
pub struct BoardProps {
    /// Disk contents per peg, bottom to top.
    pub pegs: [Vec<Disk>; NR_PEGS],
    pub move_count: u32,
    pub solving: bool,
    pub solved: bool,
    pub solve_failed: bool,
    pub selection: Option<Peg>,
    pub peg_click: Callback<Peg>,
    pub drag_move: Callback<(Peg, Peg)>,
    pub reset: Callback<()>,
    pub undo: Option<Callback<()>>,
    pub redo: Option<Callback<()>>,
    pub toggle_solver: Callback<()>,
}

/// Render the three towers with their disks, plus the surrounding buttons
/// and the move counter.
#[function_component]
pub fn Board(
    BoardProps {
        pegs,
        move_count,
        solving,
        solved,
        solve_failed,
        selection,
        peg_click,
        drag_move,
        reset,
        undo,
        redo,
        toggle_solver,
    }: &BoardProps,
) -> Html {
    let solving = *solving;

    let reset = {
        let reset = reset.clone();
        move |_| reset.emit(())
    };
    let can_undo = undo.is_some();
    let undo = {
        let undo = undo.clone();
        move |_| {
            if let Some(cb) = &undo {
                cb.emit(());
            }
        }
    };
    let can_redo = redo.is_some();
    let redo = {
        let redo = redo.clone();
        move |_| {
            if let Some(cb) = &redo {
                cb.emit(());
            }
        }
    };
    let toggle_solver = {
        let toggle_solver = toggle_solver.clone();
        move |_| toggle_solver.emit(())
    };

    let status = if *solved {
        format!("solved in {move_count} moves")
    } else if *solve_failed {
        "no solution from this position".to_string()
    } else {
        format!("moves: {move_count}")
    };

    html! {
        <div class="game">
            <div class="controls">
                <button onclick={reset}>{"reset"}</button>
                <button
                    style={format!("opacity: {};", b2f(can_undo))}
                    onclick={undo}
                >
                    <Icon icon_id={IconId::LucideUndo2} class="icon"/>
                </button>
                <button
                    style={format!("opacity: {};", b2f(can_redo))}
                    onclick={redo}
                >
                    <Icon icon_id={IconId::LucideRedo2} class="icon"/>
                </button>
                <button onclick={toggle_solver}>
                    {if solving {"stop"} else {"solve"}}
                </button>
                <span class="status">{status}</span>
            </div>

            <div class="towers">
                { for Peg::all().into_iter().map(|peg| {
                    let disks = &pegs[peg.index()];
                    let nr_on_peg = disks.len();

                    let mut classes = Classes::new();
                    classes.push("peg");
                    if *selection == Some(peg) && !solving {
                        classes.push("selected");
                    }

                    let onclick = {
                        let peg_click = peg_click.clone();
                        move |_: MouseEvent| peg_click.emit(peg)
                    };
                    let ondragover = |ev: DragEvent| ev.prevent_default();
                    let ondrop = {
                        let drag_move = drag_move.clone();
                        move |ev: DragEvent| {
                            ev.prevent_default();
                            if solving {
                                return;
                            }
                            match read_drag_payload(&ev) {
                                Ok(src) => drag_move.emit((src, peg)),
                                Err(err) => log::warn!("ignoring drop: {err:#}"),
                            }
                        }
                    };

                    html! {
                        <div class={classes} {onclick} {ondragover} {ondrop}>
                            <div class="rod"/>
                            <div class="base"/>
                            { for disks.iter().enumerate().map(|(i, &disk)| {
                                let is_top = i + 1 == nr_on_peg;
                                let draggable = is_top && !solving;
                                let ondragstart = move |ev: DragEvent| {
                                    if !draggable {
                                        ev.prevent_default();
                                        return;
                                    }
                                    if let Err(err) = write_drag_payload(&ev, peg) {
                                        log::warn!("cancelling drag: {err:#}");
                                        ev.prevent_default();
                                    }
                                };
                                html! {
                                    <div
                                        class="disk"
                                        key={disk.0}
                                        draggable={draggable.to_string()}
                                        {ondragstart}
                                        style={format!(
                                            "width: {}px; bottom: {}px; background-color: hsl({}, 70%, 50%);",
                                            disk.0 as u16 * 20 + PX_DISK_BASE_WIDTH,
                                            10 + i * PX_DISK_HEIGHT,
                                            disk.0 as u16 * 30,
                                        )}
                                    >
                                        {disk.0}
                                    </div>
                                }
                            }) }
                        </div>
                    }
                }) }
            </div>
        </div>
    }
}

/// The drag payload is just the source peg index, carried as text.
fn write_drag_payload(ev: &DragEvent, src: Peg) -> anyhow::Result<()> {
    let transfer = ev
        .data_transfer()
        .context("drag event carries no data transfer")?;
    transfer
        .set_data("text/plain", &src.index().to_string())
        .map_err(|_| anyhow!("could not attach drag payload"))
}

fn read_drag_payload(ev: &DragEvent) -> anyhow::Result<Peg> {
    let transfer = ev
        .data_transfer()
        .context("drop event carries no data transfer")?;
    let text = transfer
        .get_data("text/plain")
        .map_err(|_| anyhow!("could not read drag payload"))?;
    let index: u8 = text
        .trim()
        .parse()
        .with_context(|| format!("drag payload {text:?} is not a peg index"))?;
    Peg::new(index).with_context(|| format!("no peg with index {index}"))
}

/// Convert a bool to a float, which is useful for CSS opacity
fn b2f(b: bool) -> f32 {
    if b { 1.0 } else { 0.0 }
}

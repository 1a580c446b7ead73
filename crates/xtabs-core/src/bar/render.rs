use tracing::debug;

use crate::bar::layout::BarLayout;
use crate::display::{DisplayError, DisplayGateway, Pen, Rect, Surface};
use crate::registry::Registry;

/// Paint the whole tab bar and copy it onto the container.
///
/// Each tab is drawn on the tab scratch surface as a filled rectangle with
/// `"<index>: <name>"` and a border, then copied into the bar at its offset.
/// Reads the registry only.
pub fn draw_bar<D>(registry: &Registry, display: &mut D) -> Result<(), DisplayError>
where
    D: DisplayGateway + ?Sized,
{
    let metrics = display.metrics();
    let (width, _) = display.size();
    let bar_height = metrics.bar_height;
    let tab_width = metrics.tab_width;
    let layout = BarLayout::compute(registry);

    display.fill_rect(
        Surface::Bar,
        Pen::NormalBg,
        Rect::new(0, 0, width, bar_height),
    )?;

    let whole_tab = Rect::new(0, 0, tab_width, bar_height);
    let text_x = metrics.text_x();
    let baseline = metrics.text_baseline();

    for slot in &layout.tabs {
        let (fg, bg) = Pen::for_tab(slot.focused);
        let number = format!("{}: ", slot.index);
        let number_width = display.text_width(&number)?;
        let name = registry
            .name(slot.index)
            .map_err(|e| DisplayError::request("draw_bar", e))?
            .to_string();

        display.fill_rect(Surface::Tab, bg, whole_tab)?;
        display.draw_text(Surface::Tab, fg, text_x, baseline, &number)?;
        display.draw_text(
            Surface::Tab,
            fg,
            clamp_coord(i64::from(text_x) + i64::from(number_width)),
            baseline,
            &name,
        )?;
        display.stroke_rect(Surface::Tab, Pen::Border, whole_tab)?;
        display.copy_area(
            Surface::Tab,
            Surface::Bar,
            (0, 0),
            (clamp_coord(slot.x), 0),
            tab_width,
            bar_height,
        )?;
    }

    let end_x = clamp_coord(layout.end_x);
    display.draw_line(
        Surface::Bar,
        Pen::Border,
        (end_x, 0),
        (end_x, clamp_coord(i64::from(bar_height))),
    )?;
    display.copy_area(
        Surface::Bar,
        Surface::Container,
        (0, 0),
        (0, 0),
        width,
        bar_height,
    )?;

    debug!(
        event = "core.bar.draw_completed",
        visible_tabs = layout.tabs.len(),
        scroll_offset = registry.scroll_offset()
    );

    Ok(())
}

fn clamp_coord(value: i64) -> i16 {
    value.clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16
}

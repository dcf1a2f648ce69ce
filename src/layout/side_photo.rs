use crate::record::BiodataRecord;

use super::{Block, BlockKind, Ctx, Element, Item, MUTED_COLOR, Section, SectionKind, TextAnchor};

/// Tinted sidebar holding photo, name and contact; sections fill the right.
pub(super) fn layout(
    ctx: &Ctx<'_>,
    record: &BiodataRecord,
    sections: &[Section],
    width: f32,
    height: f32,
) -> Vec<Block> {
    let pad = ctx.sizes.padding_lg;
    let side_w = width / 3.0;
    let mut blocks = vec![sidebar(ctx, record, side_w, height)];

    let inner_w = side_w - pad * 2.0;
    let mut y = blocks[0].y + blocks[0].height;
    if let Some(divider) = ctx.divider(pad, y, inner_w) {
        y += divider.height;
        blocks.push(divider);
    }

    if let Some(contact) = sections.iter().find(|s| s.kind == SectionKind::Contact) {
        blocks.push(contact_block(ctx, contact, pad, inner_w, height, y));
    }

    let x = side_w + pad;
    let main_w = width - side_w - pad * 2.0;
    let mut y = pad;
    for section in sections.iter().filter(|s| s.kind != SectionKind::Contact) {
        let block = ctx.section(section, x, y, main_w, ctx.sizes.text_sm);
        y += block.height + ctx.config.section_gap;
        blocks.push(block);
    }
    blocks
}

/// Sidebar tint plus photo, name and location. The block height covers the
/// identity stack only; the tint spans the full page.
fn sidebar(ctx: &Ctx<'_>, record: &BiodataRecord, side_w: f32, page_height: f32) -> Block {
    let pad = ctx.sizes.padding_lg;
    let lh = ctx.config.line_height;
    let inner_w = side_w - pad * 2.0;
    let cx = side_w / 2.0;
    let mut block = Block::new(BlockKind::Sidebar, 0.0, 0.0, side_w);
    block.elements.push(Element::Rect {
        x: 0.0,
        y: 0.0,
        width: side_w,
        height: page_height,
        radius: 0.0,
        fill: ctx.accent(),
        opacity: 0.03,
    });

    let photo_w = ctx.sizes.side_photo_width.min(inner_w);
    let photo_h = ctx.sizes.side_photo_height;
    let mut y = pad;
    block
        .elements
        .push(ctx.photo(record, cx - photo_w / 2.0, y, photo_w, photo_h));
    y += photo_h + 16.0;

    y += ctx.text(
        &mut block,
        record.display_name(),
        cx,
        y,
        inner_w,
        ctx.font(ctx.sizes.text_xl, true, 0.0),
        700,
        &ctx.accent(),
        TextAnchor::Middle,
        lh,
    );

    let location = record.location_line();
    if !location.is_empty() {
        y += 4.0;
        y += ctx.text(
            &mut block,
            &location,
            cx,
            y,
            inner_w,
            ctx.font(ctx.sizes.text_xs, false, 0.0),
            400,
            MUTED_COLOR,
            TextAnchor::Middle,
            lh,
        );
    }

    block.height = y;
    block
}

/// Contact heading and text pinned to the bottom of the sidebar, never above
/// the identity stack.
fn contact_block(
    ctx: &Ctx<'_>,
    contact: &Section,
    x: f32,
    width: f32,
    page_height: f32,
    min_top: f32,
) -> Block {
    let pad = ctx.sizes.padding_lg;
    let mut probe = Block::new(BlockKind::Section(SectionKind::Contact), x, 0.0, width);
    let heading_h = ctx.heading(&mut probe, &contact.heading, x, 0.0, width);
    let font = ctx.font(ctx.sizes.text_xs, false, 0.0);
    let body_h: f32 = contact
        .items
        .iter()
        .map(|item| match item {
            Item::Paragraph(content) | Item::Row(super::Row { value: content, .. }) => {
                super::text::measure_block(content, width, font, ctx.config.paragraph_line_height)
                    .height
            }
        })
        .sum();
    let top = (page_height - pad - heading_h - body_h).max(min_top);

    let mut block = Block::new(BlockKind::Section(SectionKind::Contact), x, top, width);
    let mut y = top + ctx.heading(&mut block, &contact.heading, x, top, width);
    for item in &contact.items {
        let content = match item {
            Item::Paragraph(content) | Item::Row(super::Row { value: content, .. }) => content,
        };
        y += ctx.text(
            &mut block,
            content,
            x + width / 2.0,
            y,
            width,
            font,
            400,
            MUTED_COLOR,
            TextAnchor::Middle,
            ctx.config.paragraph_line_height,
        );
    }
    block.height = y - top;
    block
}

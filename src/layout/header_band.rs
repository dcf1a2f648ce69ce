use crate::record::BiodataRecord;
use crate::templates::{HeaderLayout, PhotoPosition};

use super::{
    Block, BlockKind, Ctx, Element, MUTED_COLOR, RULE_COLOR, Section, SectionKind, TextAnchor,
};

const LEFT_COLUMN: [SectionKind; 2] = [SectionKind::Personal, SectionKind::Career];
const RIGHT_COLUMN: [SectionKind; 3] = [SectionKind::Family, SectionKind::AboutMe, SectionKind::Preferences];

/// Header band across the top, two content columns, contact footer at the bottom.
pub(super) fn layout(
    ctx: &Ctx<'_>,
    record: &BiodataRecord,
    sections: &[Section],
    width: f32,
    height: f32,
) -> Vec<Block> {
    let pad = ctx.sizes.padding_lg;
    let content_w = width - pad * 2.0;
    let mut blocks = Vec::new();

    let header = match ctx.style.header_layout {
        HeaderLayout::LeftAligned => left_aligned_header(ctx, record, pad, content_w),
        _ => centered_header(ctx, record, pad, content_w),
    };
    let mut y = header.y + header.height + ctx.config.header_gap;
    blocks.push(header);

    if let Some(divider) = ctx.divider(pad, y, content_w) {
        y += divider.height;
        blocks.push(divider);
    }

    let col_w = (content_w - ctx.config.column_gap) / 2.0;
    let columns = [
        (pad, &LEFT_COLUMN[..]),
        (pad + col_w + ctx.config.column_gap, &RIGHT_COLUMN[..]),
    ];
    let mut content_bottom = y;
    for (x, kinds) in columns {
        let mut col_y = y;
        for kind in kinds {
            let Some(section) = sections.iter().find(|s| s.kind == *kind) else {
                continue;
            };
            let block = ctx.section(section, x, col_y, col_w, ctx.sizes.text_sm);
            col_y += block.height + ctx.config.section_gap;
            blocks.push(block);
        }
        content_bottom = content_bottom.max(col_y);
    }

    blocks.push(footer(ctx, record, pad, content_w, height, content_bottom));
    blocks
}

fn centered_header(ctx: &Ctx<'_>, record: &BiodataRecord, pad: f32, content_w: f32) -> Block {
    let mut block = Block::new(BlockKind::Header, pad, pad, content_w);
    let cx = pad + content_w / 2.0;
    let size = ctx.sizes.photo_size;
    let mut y = pad;

    block
        .elements
        .push(ctx.photo(record, cx - size / 2.0, y, size, size));
    y += size + 16.0;
    y += title_stack(ctx, &mut block, record, cx, y, content_w, TextAnchor::Middle);

    block.height = y - pad;
    block
}

fn left_aligned_header(ctx: &Ctx<'_>, record: &BiodataRecord, pad: f32, content_w: f32) -> Block {
    let mut block = Block::new(BlockKind::Header, pad, pad, content_w);
    let size = ctx.sizes.photo_size;
    let gap = 24.0;
    let text_w = (content_w - size - gap).max(size);
    let (photo_x, text_x) = match ctx.style.photo_position {
        PhotoPosition::TopRight => (pad + content_w - size, pad),
        PhotoPosition::TopCenter | PhotoPosition::Side => (pad, pad + size + gap),
    };

    let text_h = title_stack(ctx, &mut block, record, text_x, pad, text_w, TextAnchor::Start);
    block.elements.push(ctx.photo(record, photo_x, pad, size, size));

    block.height = text_h.max(size);
    block
}

/// Caption, name and location. Returns the height used.
fn title_stack(
    ctx: &Ctx<'_>,
    block: &mut Block,
    record: &BiodataRecord,
    x: f32,
    top: f32,
    width: f32,
    anchor: TextAnchor,
) -> f32 {
    let lh = ctx.config.line_height;
    let accent = ctx.accent();
    let mut y = top;

    y += ctx.caption(block, x, y, width, anchor) + 4.0;

    let name_size = ctx.sizes.text_2xl;
    y += ctx.text(
        block,
        record.display_name(),
        x,
        y,
        width,
        ctx.font(name_size, true, 0.0),
        700,
        &accent,
        anchor,
        lh,
    );

    let location = record.location_line();
    if !location.is_empty() {
        let size = ctx.sizes.text_sm;
        y += 4.0;
        y += ctx.text(
            block,
            &location,
            x,
            y,
            width,
            ctx.font(size, false, 0.0),
            400,
            MUTED_COLOR,
            anchor,
            lh,
        );
    }
    y - top
}

fn footer(
    ctx: &Ctx<'_>,
    record: &BiodataRecord,
    pad: f32,
    content_w: f32,
    page_height: f32,
    content_bottom: f32,
) -> Block {
    let size = ctx.sizes.text_xs;
    let lh = ctx.config.line_height;
    let inset = 16.0;
    let font = ctx.font(size, false, 0.0);
    let text_h = super::text::measure_block(record.contact_text(), content_w, font, lh).height;
    let footer_h = inset + text_h;
    let top = (page_height - pad - footer_h).max(content_bottom);

    let mut block = Block::new(BlockKind::Footer, pad, top, content_w);
    block.elements.push(Element::Line {
        x1: pad,
        y1: top + 0.5,
        x2: pad + content_w,
        y2: top + 0.5,
        stroke: RULE_COLOR.to_string(),
        width: 1.0,
        opacity: 1.0,
    });
    ctx.text(
        &mut block,
        record.contact_text(),
        pad + content_w / 2.0,
        top + inset,
        content_w,
        font,
        400,
        MUTED_COLOR,
        TextAnchor::Middle,
        lh,
    );
    block.height = footer_h;
    block
}

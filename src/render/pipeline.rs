use crate::assets::artwork::ArtworkSource;
use crate::assets::decode::decode_artwork;
use crate::assets::fonts::FontRegistry;
use crate::encode::png::encode_png;
use crate::foundation::core::{RenderedFrame, Surface};
use crate::foundation::error::{CardError, CardResult};
use crate::render::artwork::{ArtworkPlacement, draw_artwork};
use crate::render::composite::{BlendMode, draw_at, mask_in_place, over_in_place};
use crate::render::frame::{FrameGeometry, MARGIN};
use crate::render::gradient::GradientFill;
use crate::render::progress::ProgressBar;
use crate::render::text::{TextLayoutEngine, TextProfile};
use crate::request::model::PreviewRequest;

/// Render a preview card and encode it as PNG.
pub async fn render_preview<S: ArtworkSource>(
    request: &PreviewRequest,
    source: &S,
) -> CardResult<Vec<u8>> {
    let frame = render_preview_rgba(request, source).await?;
    encode_png(&frame)
}

/// Render a preview card to premultiplied RGBA8 pixels.
///
/// Stages run in a fixed order: frame and gradient, artwork with shadow, title and metadata text,
/// progress bar, then the rounded frame mask. The artwork fetch is the only await point; any
/// failure aborts the render with no partial output.
#[tracing::instrument(
    skip(request, source),
    fields(mode = ?request.mode, artwork = %request.track.artwork_url)
)]
pub async fn render_preview_rgba<S: ArtworkSource>(
    request: &PreviewRequest,
    source: &S,
) -> CardResult<RenderedFrame> {
    request.validate()?;
    let font = FontRegistry::resolve()?;
    let (width, height) = request.dimensions();
    let geom = FrameGeometry::new(width, height);
    tracing::debug!(
        width,
        height,
        inner_width = geom.inner_width,
        inner_height = geom.inner_height,
        "frame geometry"
    );

    let mut canvas = Surface::transparent(width, height)?;
    let fill = GradientFill::from_spec(
        &request.gradient,
        geom.inner_width_f(),
        geom.inner_height_f(),
    )?;
    let background =
        fill.rasterize_region(MARGIN, MARGIN, geom.inner_width, geom.inner_height)?;
    draw_at(
        &mut canvas,
        &background,
        i64::from(MARGIN),
        i64::from(MARGIN),
        BlendMode::Normal,
    );

    let placement = ArtworkPlacement::for_mode(request.mode, &geom);
    let bytes = source
        .fetch(&request.track.artwork_url)
        .await
        .map_err(CardError::artwork)?;
    let image = decode_artwork(&bytes, placement.size.ceil() as u32)?;
    tracing::debug!(
        x = placement.x,
        y = placement.y,
        size = placement.size,
        src_w = image.width(),
        src_h = image.height(),
        "artwork placement"
    );
    draw_artwork(&mut canvas, &image, &placement)?;

    let profile = TextProfile::for_mode(request.mode, &geom, &placement);
    let lines = profile.lines(&request.track);
    let mut engine = TextLayoutEngine::new(font)?;
    let text = engine.draw_lines(&lines, width, height)?;
    over_in_place(&mut canvas, &text)?;
    tracing::debug!(
        family = font.family(),
        text_x = profile.text_x,
        title_baseline = profile.title_baseline,
        "drew text"
    );

    if let Some(bar) = ProgressBar::resolve(request.progress.as_ref()) {
        bar.draw(&mut canvas, &geom)?;
    }

    let mask = geom.frame_mask()?;
    mask_in_place(&mut canvas, &mask)?;

    Ok(canvas.into())
}

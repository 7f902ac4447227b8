//! End-to-end checks of the upload → key → place → export flow.

use decal::{
    apply_colour_key, to_export_space, BaseModel, ColourKey, DecalError, GestureHandler,
    InvocationContext, Locale, Manifest, PlacementState, Point, RasterImage, Session, Size,
    Translator, UploadOutcome,
};
use image::{Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

const WHITE: [u8; 4] = [255, 255, 255, 255];
const NAVY: [u8; 4] = [0, 0, 128, 255];
const GOLD: [u8; 4] = [255, 215, 0, 255];

/// A gold square on a flat white background.
fn logo_on_white() -> RasterImage {
    RasterImage::from_rgba(RgbaImage::from_fn(8, 8, |x, y| {
        if (2..6).contains(&x) && (2..6).contains(&y) {
            Rgba(GOLD)
        } else {
            Rgba(WHITE)
        }
    }))
}

#[test]
fn red_logo_keyed_with_red_is_fully_transparent() {
    let logo = RasterImage::filled(100, 100, [255, 0, 0, 255]);
    let out = apply_colour_key(&logo, "#FF0000".parse().unwrap());
    assert!(out.as_rgba().pixels().all(|p| p.0[3] == 0));
}

#[test]
fn preview_x_100_maps_to_native_300() {
    let placement = PlacementState::new(Point::new(100.0, 0.0), 50.0, 1.0);
    let rect = to_export_space(&placement, Size::new(400.0, 300.0), Size::new(1200.0, 900.0))
        .unwrap();
    assert_eq!(rect.x, 300.0);
}

#[test]
fn full_session_export() {
    let manifest = Manifest::parse("colour_key: \"#FFFFFF\"\nsize:\n  min: 1\n  max: 500").unwrap();
    let mut session = Session::from_manifest(&manifest);

    let ticket = session.begin_upload();
    let outcome = session
        .complete_upload(ticket, &logo_on_white().encode_png().unwrap())
        .unwrap();
    assert_eq!(outcome, UploadOutcome::Accepted);

    // Move from (420, 60) to (10, 10) and shrink from 100 to 8.
    session.on_drag_delta(-410.0, -50.0);
    session.on_pinch_delta(-92.0);

    let base = RasterImage::filled(64, 64, NAVY);
    let result = session
        .export(&base, Size::new(32.0, 32.0))
        .unwrap()
        .expect("logo uploaded");

    assert_eq!(result.filename, "custom_car.png");
    assert_eq!(result.image.dimensions(), (64, 64));

    // Logo occupies native (20..36); its white border was keyed out.
    assert_eq!(result.image.get(21, 21), Some(NAVY));
    assert_eq!(result.image.get(28, 28), Some(GOLD));
    assert_eq!(result.image.get(40, 40), Some(NAVY));

    let dir = tempdir().unwrap();
    let path = result.write_to(dir.path()).unwrap();
    let written = image::open(path).unwrap().to_rgba8();
    assert_eq!(written.get_pixel(28, 28).0, GOLD);
}

#[test]
fn export_before_upload_produces_nothing() {
    let session = Session::default();
    let base = RasterImage::filled(4, 4, NAVY);
    assert!(session.export(&base, Size::new(4.0, 4.0)).unwrap().is_none());
}

#[test]
fn export_with_unmeasured_preview_fails() {
    let mut session = Session::default();
    let ticket = session.begin_upload();
    session
        .complete_upload(ticket, &logo_on_white().encode_png().unwrap())
        .unwrap();

    let base = RasterImage::filled(4, 4, NAVY);
    let err = session.export(&base, Size::new(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, DecalError::InvalidLayout { .. }));
    assert!(session.logo().is_some());
}

#[test]
fn selectors_and_text_fall_back() {
    let ctx = InvocationContext::from_query("?model=unknown&lang=xx");
    assert_eq!(ctx.model, BaseModel::Vivaro);
    assert_eq!(ctx.locale, Locale::En);

    let t = Translator::new(ctx.locale);
    assert_eq!(t.t("upload.button"), "Upload Logo");
    assert_eq!(t.t("upload.missing"), "upload.missing");
}

#[test]
fn key_change_after_upload_reprocesses() {
    let mut session = Session::default();
    let ticket = session.begin_upload();
    session
        .complete_upload(ticket, &logo_on_white().encode_png().unwrap())
        .unwrap();

    // Default key is black, so the white border is still opaque.
    assert_eq!(session.logo().unwrap().get(0, 0), Some(WHITE));

    session.set_colour_key(ColourKey::WHITE);
    assert_eq!(session.logo().unwrap().get(0, 0), Some([255, 255, 255, 0]));
    assert_eq!(session.logo().unwrap().get(3, 3), Some(GOLD));
}

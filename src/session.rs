//! Editor session state.
//!
//! A session owns everything a front end binds to: the uploaded logo, the
//! colour key, the placement and the current wizard step. All mutation goes
//! through `&mut self` in response to discrete events, so there is no
//! locking. The keyed logo is always derived from the decoded upload and
//! the key; changing either recomputes it.

use tracing::{debug, warn};

use crate::config::{Manifest, Variant};
use crate::error::Result;
use crate::gesture::{GestureController, GestureHandler};
use crate::render::{apply_colour_key, export_from_sources, ExportResult, ImageSource};
use crate::types::{ColourKey, PlacementState, RasterImage, Size, SizeLimits};

/// Identifies one upload so its completion can be matched to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket(u64);

/// What happened to a completed upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The logo was decoded, keyed and is now displayed.
    Accepted,
    /// A newer upload started in the meantime; this result was dropped.
    Superseded,
}

/// Wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Upload,
    Adjust,
    Export,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Upload, Step::Adjust, Step::Export];

    /// Translation key for the step label.
    pub fn label_key(self) -> &'static str {
        match self {
            Step::Upload => "step.upload",
            Step::Adjust => "step.adjust",
            Step::Export => "step.export",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    variant: Variant,
    key: ColourKey,
    source: Option<RasterImage>,
    logo: Option<RasterImage>,
    gestures: GestureController,
    latest_upload: u64,
    loading: bool,
    step: usize,
}

impl Session {
    pub fn new(variant: Variant, placement: PlacementState, limits: SizeLimits) -> Self {
        Self {
            variant,
            key: variant.colour_key,
            source: None,
            logo: None,
            gestures: GestureController::new(placement, limits),
            latest_upload: 0,
            loading: false,
            step: 0,
        }
    }

    pub fn from_manifest(manifest: &Manifest) -> Self {
        Self::new(
            manifest.variant(),
            manifest.initial.to_placement(),
            manifest.size,
        )
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Start reading a new upload.
    ///
    /// Any upload still in flight becomes stale.
    pub fn begin_upload(&mut self) -> UploadTicket {
        self.latest_upload += 1;
        self.loading = true;
        UploadTicket(self.latest_upload)
    }

    /// Deliver the bytes of an upload started with [`Session::begin_upload`].
    ///
    /// Results for anything but the most recent ticket are discarded. A
    /// decode failure leaves the previously accepted logo in place.
    pub fn complete_upload(&mut self, ticket: UploadTicket, bytes: &[u8]) -> Result<UploadOutcome> {
        if ticket.0 != self.latest_upload {
            warn!(
                ticket = ticket.0,
                latest = self.latest_upload,
                "discarding stale upload"
            );
            return Ok(UploadOutcome::Superseded);
        }

        let decoded = RasterImage::decode(bytes);
        self.loading = false;
        let source = decoded?;

        let logo = apply_colour_key(&source, self.key);
        self.gestures.set_aspect_ratio(logo.aspect_ratio());
        self.source = Some(source);
        self.logo = Some(logo);
        if self.current_step() == Step::Upload {
            self.advance_step();
        }

        debug!(ticket = ticket.0, "upload accepted");
        Ok(UploadOutcome::Accepted)
    }

    /// Change the colour key and re-derive the displayed logo.
    pub fn set_colour_key(&mut self, key: ColourKey) {
        if key == self.key {
            return;
        }
        self.key = key;
        if let Some(source) = &self.source {
            self.logo = Some(apply_colour_key(source, key));
        }
    }

    pub fn colour_key(&self) -> ColourKey {
        self.key
    }

    /// The keyed logo currently displayed, if any.
    pub fn logo(&self) -> Option<&RasterImage> {
        self.logo.as_ref()
    }

    /// True while the latest upload has not completed.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn placement(&self) -> &PlacementState {
        self.gestures.placement()
    }

    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    pub fn gestures_mut(&mut self) -> &mut GestureController {
        &mut self.gestures
    }

    /// Export needs a processed logo.
    pub fn can_export(&self) -> bool {
        self.logo.is_some()
    }

    /// Composite the current logo onto `base`.
    ///
    /// `preview` is the base image's on-screen size measured now. Returns
    /// `Ok(None)` when there is no logo yet; nothing is produced then.
    pub fn export(&self, base: &dyn ImageSource, preview: Size) -> Result<Option<ExportResult>> {
        let Some(logo) = &self.logo else {
            debug!("export requested without a logo");
            return Ok(None);
        };
        export_from_sources(base, logo, self.placement(), preview).map(Some)
    }

    /// Number of wizard steps this variant shows.
    pub fn step_count(&self) -> usize {
        usize::from(self.variant.steps).clamp(1, Step::ALL.len())
    }

    pub fn current_step(&self) -> Step {
        Step::ALL[self.step]
    }

    /// Move to the next step. Leaving the upload step requires a logo.
    pub fn advance_step(&mut self) -> bool {
        if self.step + 1 >= self.step_count() {
            return false;
        }
        if self.current_step() == Step::Upload && self.logo.is_none() {
            return false;
        }
        self.step += 1;
        true
    }

    pub fn previous_step(&mut self) -> bool {
        if self.step == 0 {
            return false;
        }
        self.step -= 1;
        true
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::from_manifest(&Manifest::default())
    }
}

impl GestureHandler for Session {
    fn on_drag_delta(&mut self, dx: f64, dy: f64) {
        self.gestures.on_drag_delta(dx, dy);
    }

    fn on_pinch_delta(&mut self, d: f64) {
        self.gestures.on_pinch_delta(d);
    }
}

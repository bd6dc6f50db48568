use bytes::BytesMut;
use serde::Serialize;
use tracing::warn;

use crate::color::ColorRgb;
use crate::error::{FrameError, Result};
use crate::profile::DeviceProfile;

/// NULL start code for standard dimmer data.
pub const START_CODE: u8 = 0x00;

/// Data slots in one DMX512 universe (excluding the start code).
pub const MAX_SLOTS: usize = 512;

/// Geometry of a universe for a profile and a requested fixture count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UniverseLayout {
    /// Active device profile.
    pub profile: DeviceProfile,
    /// Fixtures asked for by configuration.
    pub requested: usize,
    /// Fixtures actually driven: `min(requested, MAX_SLOTS / slots_per_fixture)`.
    pub fixture_count: usize,
    /// Wire size: start code plus `slots_per_fixture * fixture_count`.
    pub buffer_len: usize,
}

impl UniverseLayout {
    /// Compute the layout. Requests beyond the universe capacity are clamped.
    pub fn new(profile: DeviceProfile, requested: usize) -> Self {
        let fixture_count = requested.min(Self::capacity(profile));
        let layout = Self {
            profile,
            requested,
            fixture_count,
            buffer_len: 1 + profile.slots_per_fixture() * fixture_count,
        };
        if layout.is_truncated() {
            warn!(
                profile = %profile,
                requested,
                driven = fixture_count,
                "universe full; extra fixtures are not driven"
            );
        }
        layout
    }

    /// Maximum fixtures one universe holds for `profile`.
    pub const fn capacity(profile: DeviceProfile) -> usize {
        MAX_SLOTS / profile.slots_per_fixture()
    }

    /// Slots consumed by one fixture.
    pub const fn slots_per_fixture(&self) -> usize {
        self.profile.slots_per_fixture()
    }

    /// Whether fewer fixtures are driven than were requested.
    pub const fn is_truncated(&self) -> bool {
        self.fixture_count < self.requested
    }
}

/// Encode `colors` into a wire buffer laid out by `layout`.
///
/// `dst` must be `layout.buffer_len` bytes. Byte 0 is left untouched, and
/// `dst` is not written at all when either input is rejected.
pub fn encode_frame(layout: &UniverseLayout, colors: &[ColorRgb], dst: &mut [u8]) -> Result<()> {
    if dst.len() != layout.buffer_len {
        return Err(FrameError::BufferLength {
            expected: layout.buffer_len,
            got: dst.len(),
        });
    }

    if colors.len() < layout.fixture_count {
        return Err(FrameError::NotEnoughColors {
            needed: layout.fixture_count,
            got: colors.len(),
        });
    }

    let start = layout.profile.start_channel();
    let slots = &mut dst[start..start + layout.slots_per_fixture() * layout.fixture_count];
    for (fixture, color) in slots
        .chunks_exact_mut(layout.slots_per_fixture())
        .zip(colors)
    {
        layout.profile.encode_fixture(*color, fixture);
    }
    Ok(())
}

/// Fixed-size DMX packet buffer, reused for every frame.
///
/// Allocated once from a [`UniverseLayout`]; its length never changes and
/// byte 0 always holds [`START_CODE`].
#[derive(Debug, Clone)]
pub struct ChannelBuffer {
    layout: UniverseLayout,
    bytes: BytesMut,
}

impl ChannelBuffer {
    /// Allocate a zeroed buffer for `layout` with the start code in place.
    pub fn new(layout: UniverseLayout) -> Self {
        let mut bytes = BytesMut::zeroed(layout.buffer_len);
        bytes[0] = START_CODE;
        Self { layout, bytes }
    }

    /// Encode a frame in place. Does not allocate.
    pub fn encode(&mut self, colors: &[ColorRgb]) -> Result<()> {
        encode_frame(&self.layout, colors, &mut self.bytes)
    }

    /// The layout this buffer was sized for.
    pub fn layout(&self) -> &UniverseLayout {
        &self.layout
    }

    /// Bytes to put on the wire, start code included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Wire length in bytes (always at least 1).
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer has no bytes. A buffer from [`ChannelBuffer::new`]
    /// holds at least the start code.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

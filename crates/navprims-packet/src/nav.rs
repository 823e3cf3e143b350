use crate::fixed::deg2rad;

/// Read-only view of a navigation solution at the current instant.
///
/// Angles are in radians, lengths in meters and velocities in m/s (north-east-down).
pub trait NavigationState {
    fn longitude(&self) -> f64;
    fn latitude(&self) -> f64;
    fn height(&self) -> f64;
    fn v_north(&self) -> f64;
    fn v_east(&self) -> f64;
    fn v_down(&self) -> f64;
    /// Yaw.
    fn heading(&self) -> f64;
    fn pitch(&self) -> f64;
    fn roll(&self) -> f64;
    fn azimuth(&self) -> f64;
}

impl<T: NavigationState + ?Sized> NavigationState for &T {
    fn longitude(&self) -> f64 {
        (**self).longitude()
    }
    fn latitude(&self) -> f64 {
        (**self).latitude()
    }
    fn height(&self) -> f64 {
        (**self).height()
    }
    fn v_north(&self) -> f64 {
        (**self).v_north()
    }
    fn v_east(&self) -> f64 {
        (**self).v_east()
    }
    fn v_down(&self) -> f64 {
        (**self).v_down()
    }
    fn heading(&self) -> f64 {
        (**self).heading()
    }
    fn pitch(&self) -> f64 {
        (**self).pitch()
    }
    fn roll(&self) -> f64 {
        (**self).roll()
    }
    fn azimuth(&self) -> f64 {
        (**self).azimuth()
    }
}

/// A plain-value navigation state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NavSnapshot {
    pub longitude: f64,
    pub latitude: f64,
    pub height: f64,
    pub v_north: f64,
    pub v_east: f64,
    pub v_down: f64,
    pub heading: f64,
    pub pitch: f64,
    pub roll: f64,
    pub azimuth: f64,
}

impl NavSnapshot {
    /// Build a snapshot from angles given in degrees.
    #[allow(clippy::too_many_arguments)]
    pub fn from_degrees(
        longitude_deg: f64,
        latitude_deg: f64,
        height: f64,
        velocity_ned: [f64; 3],
        heading_deg: f64,
        pitch_deg: f64,
        roll_deg: f64,
        azimuth_deg: f64,
    ) -> Self {
        Self {
            longitude: deg2rad(longitude_deg),
            latitude: deg2rad(latitude_deg),
            height,
            v_north: velocity_ned[0],
            v_east: velocity_ned[1],
            v_down: velocity_ned[2],
            heading: deg2rad(heading_deg),
            pitch: deg2rad(pitch_deg),
            roll: deg2rad(roll_deg),
            azimuth: deg2rad(azimuth_deg),
        }
    }
}

impl NavigationState for NavSnapshot {
    fn longitude(&self) -> f64 {
        self.longitude
    }
    fn latitude(&self) -> f64 {
        self.latitude
    }
    fn height(&self) -> f64 {
        self.height
    }
    fn v_north(&self) -> f64 {
        self.v_north
    }
    fn v_east(&self) -> f64 {
        self.v_east
    }
    fn v_down(&self) -> f64 {
        self.v_down
    }
    fn heading(&self) -> f64 {
        self.heading
    }
    fn pitch(&self) -> f64 {
        self.pitch
    }
    fn roll(&self) -> f64 {
        self.roll
    }
    fn azimuth(&self) -> f64 {
        self.azimuth
    }
}

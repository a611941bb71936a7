// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::Joint;

/// The displayed state of a chain pendulum.
///
/// A pendulum with `n` segments has `n + 1` weights; weight `0` is the
/// suspension point. Each weight is described by its horizontal deflection.
#[derive(Debug, Clone, PartialEq)]
pub struct Pendulum {
    deflections: Vec<f32>,
    length: f32,
    mass: f32,
    radius: f32,
}

impl Pendulum {
    /// Number of segments of a default pendulum.
    pub const DEFAULT_SEGMENT_COUNT: usize = 1;
    /// Default segment length.
    pub const DEFAULT_LENGTH: f32 = 1.0;
    /// Default mass of one weight.
    pub const DEFAULT_MASS: f32 = 1.0;
    /// Default radius of one weight.
    pub const DEFAULT_RADIUS: f32 = 0.2;

    /// Creates a hanging pendulum of `segment_count` segments at rest.
    pub fn new(segment_count: usize, length: f32, mass: f32, radius: f32) -> Self {
        Self {
            deflections: vec![0.0; segment_count + 1],
            length,
            mass,
            radius,
        }
    }

    /// Creates a pendulum with one weight per entry of `deflections`.
    pub fn from_deflections(deflections: Vec<f32>, length: f32, mass: f32, radius: f32) -> Self {
        Self {
            deflections,
            length,
            mass,
            radius,
        }
    }

    /// Returns the number of segments.
    pub fn segment_count(&self) -> usize {
        self.deflections.len().saturating_sub(1)
    }

    /// Resizes the chain to `segment_count` segments and brings it to rest.
    pub fn set_segment_count(&mut self, segment_count: usize) {
        self.deflections = vec![0.0; segment_count + 1];
    }

    /// Returns the number of weights, suspension point included.
    pub fn weight_count(&self) -> usize {
        self.deflections.len()
    }

    /// Returns the length of one segment.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Returns the length of the whole chain.
    pub fn total_length(&self) -> f32 {
        self.length * self.segment_count() as f32
    }

    /// Sets the length of one segment.
    pub fn set_length(&mut self, length: f32) {
        self.length = length;
    }

    /// Returns the mass of one weight.
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Returns the mass of all weights.
    pub fn total_mass(&self) -> f32 {
        self.mass * self.weight_count() as f32
    }

    /// Sets the mass of one weight.
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
    }

    /// Returns the radius of one weight.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Sets the radius of one weight.
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    /// Returns the deflection of weight `i`, if it exists.
    pub fn deflection(&self, i: usize) -> Option<f32> {
        self.deflections.get(i).copied()
    }

    /// Returns all deflections, suspension point first.
    pub fn deflections(&self) -> &[f32] {
        &self.deflections
    }

    /// Sets the deflection of weight `i` and returns the previous one.
    ///
    /// Returns `None` and leaves the pendulum untouched if `i` is out of range.
    pub fn set_deflection(&mut self, i: usize, deflection: f32) -> Option<f32> {
        self.deflections
            .get_mut(i)
            .map(|slot| std::mem::replace(slot, deflection))
    }

    /// Replaces every deflection. The segment count follows `deflections`.
    pub fn set_deflections(&mut self, deflections: Vec<f32>) {
        self.deflections = deflections;
    }

    /// Computes the polyline through all weights.
    ///
    /// The suspension point sits at `(d0, 0)`. Each following weight hangs one
    /// segment below its predecessor; a horizontal offset longer than the
    /// segment collapses the vertical step to zero.
    pub fn positions(&self) -> Vec<Joint> {
        let length_sq = self.length * self.length;
        let mut joints: Vec<Joint> = Vec::with_capacity(self.deflections.len());

        let mut previous: Option<(f32, Joint)> = None;
        for &deflection in &self.deflections {
            let joint = match previous {
                None => Joint::new(deflection, 0.0),
                Some((previous_deflection, previous_joint)) => {
                    let dx = deflection - previous_deflection;
                    let dy_sq = length_sq - dx * dx;
                    let dy = if dy_sq <= 0.0 { 0.0 } else { dy_sq.sqrt() };
                    Joint::new(deflection, previous_joint.y + dy)
                }
            };
            joints.push(joint);
            previous = Some((deflection, joint));
        }

        joints
    }
}

impl Default for Pendulum {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_SEGMENT_COUNT,
            Self::DEFAULT_LENGTH,
            Self::DEFAULT_MASS,
            Self::DEFAULT_RADIUS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_pendulum() {
        let pendulum = Pendulum::default();
        assert_eq!(pendulum.segment_count(), 1);
        assert_eq!(pendulum.weight_count(), 2);
        assert_relative_eq!(pendulum.total_length(), 1.0);
        assert_relative_eq!(pendulum.total_mass(), 2.0);
        assert_relative_eq!(pendulum.radius(), 0.2);
    }

    #[test]
    fn test_resting_chain_hangs_straight() {
        let pendulum = Pendulum::new(3, 2.0, 1.0, 0.25);
        let joints = pendulum.positions();

        assert_eq!(joints.len(), 4);
        for (i, joint) in joints.iter().enumerate() {
            assert_relative_eq!(joint.x, 0.0);
            assert_relative_eq!(joint.y, 2.0 * i as f32);
        }
    }

    #[test]
    fn test_deflected_segment_shortens_vertically() {
        let pendulum = Pendulum::from_deflections(vec![0.0, 0.6], 1.0, 1.0, 0.2);
        let joints = pendulum.positions();
        assert_eq!(joints[0], Joint::new(0.0, 0.0));
        assert_relative_eq!(joints[1].x, 0.6);
        assert_relative_eq!(joints[1].y, 0.8, epsilon = 1e-6);
    }

    #[test]
    fn test_overstretched_segment_is_flat() {
        let pendulum = Pendulum::from_deflections(vec![0.5, 2.5, 2.5], 1.0, 1.0, 0.2);
        let joints = pendulum.positions();
        assert_eq!(joints[0], Joint::new(0.5, 0.0));
        assert_eq!(joints[1], Joint::new(2.5, 0.0));
        assert_eq!(joints[2], Joint::new(2.5, 1.0));
    }

    #[test]
    fn test_deflection_accessors() {
        let mut pendulum = Pendulum::default();
        assert_eq!(pendulum.set_deflection(1, 0.3), Some(0.0));
        assert_eq!(pendulum.deflection(1), Some(0.3));
        assert_eq!(pendulum.set_deflection(5, 1.0), None);
        assert_eq!(pendulum.deflection(5), None);

        pendulum.set_deflections(vec![0.0, 0.1, 0.2, 0.3]);
        assert_eq!(pendulum.segment_count(), 3);

        pendulum.set_segment_count(2);
        assert_eq!(pendulum.deflections(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_pendulum_has_no_joints() {
        let pendulum = Pendulum::from_deflections(Vec::new(), 1.0, 1.0, 0.2);
        assert_eq!(pendulum.segment_count(), 0);
        assert!(pendulum.positions().is_empty());
    }
}

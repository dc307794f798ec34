// Airy point-spread function
//
// A microscope objective cannot focus a point source to a point: the
// circular aperture diffracts the light into the Airy pattern
//
//   I(r) = [2·J1(x)/x]²     with x = (2π/λ)·NA·|r − center|
//
// The bracket tends to 1 as x → 0, so the on-axis intensity is exactly
// 1.0 by definition (removable singularity). All distances are in
// micrometers; the wavelength argument is in nanometers because that is
// how the UI sliders express it.

use crate::bessel::bessel_j1;
use std::f64::consts::PI;

// Below this |x| the series 2·J1(x)/x = 1 − x²/8 + ... is 1.0 to double
// precision anyway; guarding avoids the 0/0
const SINGULARITY_GUARD: f64 = 1e-9;

/// Normalized Airy intensity at radial position `r` (µm) for a point
/// source imaged at `center` (µm).
pub fn airy_disk(r: f64, wavelength_nm: f64, numerical_aperture: f64, center: f64) -> f64 {
    let wavelength_um = wavelength_nm / 1000.0;
    let x = (2.0 * PI / wavelength_um) * numerical_aperture * (r - center).abs();

    if x < SINGULARITY_GUARD {
        return 1.0;
    }

    let amplitude = 2.0 * bessel_j1(x) / x;
    amplitude * amplitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_is_exactly_one() {
        for &(wl, na) in &[(400.0, 0.1), (550.0, 1.0), (700.0, 1.4)] {
            assert_eq!(airy_disk(0.0, wl, na, 0.0), 1.0);
            assert_eq!(airy_disk(0.75, wl, na, 0.75), 1.0);
        }
    }

    #[test]
    fn symmetric_about_center() {
        let center = 0.25;
        for i in 1..50 {
            let dr = i as f64 * 0.03;
            let left = airy_disk(center - dr, 550.0, 1.0, center);
            let right = airy_disk(center + dr, 550.0, 1.0, center);
            assert!((left - right).abs() < 1e-14, "asymmetry at dr={dr}");
        }
    }

    // The first dark ring sits where J1 has its first zero (x ≈ 3.8317),
    // i.e. at r = 0.61 λ/NA — the Rayleigh radius
    #[test]
    fn first_minimum_at_rayleigh_radius() {
        let (wl, na) = (550.0, 1.0);
        let rayleigh = 0.61 * (wl / 1000.0) / na;
        let at_min = airy_disk(rayleigh, wl, na, 0.0);
        assert!(at_min < 1e-5, "intensity at first ring: {at_min}");
        // and it really is a minimum
        assert!(airy_disk(rayleigh - 0.02, wl, na, 0.0) > at_min);
        assert!(airy_disk(rayleigh + 0.02, wl, na, 0.0) > at_min);
    }

    #[test]
    fn intensity_never_negative() {
        for i in 0..400 {
            let r = -2.0 + i as f64 * 0.01;
            assert!(airy_disk(r, 400.0, 1.4, 0.3) >= 0.0);
        }
    }
}

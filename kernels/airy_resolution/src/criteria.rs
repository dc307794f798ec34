// Resolution criteria and sampling-rate analysis
//
// Three classic two-point resolution criteria, all of the form k·λ/NA:
//
// - Rayleigh (k = 0.61): maximum of one Airy pattern on the first
//   minimum of the other; a clear dip between the peaks
// - Abbe (k = 0.5): the diffraction limit from the passband of the
//   objective
// - Sparrow (k = 0.47): the dip just vanishes; the summed profile is
//   flat-topped
//
// The Nyquist helper ties the camera to the optics: two pixels per
// Rayleigh radius is the minimum sampling that preserves the resolution
// the objective delivers.

use std::fmt;

// UI highlight tolerance for "separation is at this criterion".
// Tunable display constant, not a physical invariant.
pub const NEAR_CRITERION_TOLERANCE_UM: f64 = 0.01;

pub fn rayleigh_criterion_um(wavelength_nm: f64, numerical_aperture: f64) -> f64 {
    0.61 * (wavelength_nm / 1000.0) / numerical_aperture
}

pub fn abbe_criterion_um(wavelength_nm: f64, numerical_aperture: f64) -> f64 {
    0.5 * (wavelength_nm / 1000.0) / numerical_aperture
}

pub fn sparrow_criterion_um(wavelength_nm: f64, numerical_aperture: f64) -> f64 {
    0.47 * (wavelength_nm / 1000.0) / numerical_aperture
}

/// True when the current separation sits at a criterion value, within
/// the highlight tolerance. Two criteria that coincide within tolerance
/// may both report true; ties are not broken.
pub fn near_criterion(separation_um: f64, criterion_um: f64) -> bool {
    (separation_um - criterion_um).abs() < NEAR_CRITERION_TOLERANCE_UM
}

/// Pixel size for Nyquist sampling: half the Rayleigh radius, i.e. two
/// pixels per Airy radius.
pub fn nyquist_pixel_size_um(wavelength_nm: f64, numerical_aperture: f64) -> f64 {
    rayleigh_criterion_um(wavelength_nm, numerical_aperture) / 2.0
}

/// Sampling rate relative to the optics: Rayleigh radius / pixel size.
/// Pixel size 0 is continuous mode and gets its own display value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplingRate {
    Continuous,
    PixelsPerAiryRadius(f64),
}

pub fn sampling_rate(
    wavelength_nm: f64,
    numerical_aperture: f64,
    pixel_size_um: f64,
) -> SamplingRate {
    if pixel_size_um <= 0.0 {
        SamplingRate::Continuous
    } else {
        let rayleigh = rayleigh_criterion_um(wavelength_nm, numerical_aperture);
        SamplingRate::PixelsPerAiryRadius(rayleigh / pixel_size_um)
    }
}

impl fmt::Display for SamplingRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingRate::Continuous => write!(f, "continuous"),
            SamplingRate::PixelsPerAiryRadius(rate) => write!(f, "{rate:.2}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criterion_ordering_holds_over_the_domain() {
        let mut na = 0.1;
        while na <= 1.4 {
            let mut wl = 400.0;
            while wl <= 700.0 {
                let sparrow = sparrow_criterion_um(wl, na);
                let abbe = abbe_criterion_um(wl, na);
                let rayleigh = rayleigh_criterion_um(wl, na);
                assert!(sparrow < abbe && abbe < rayleigh, "NA={na} λ={wl}");
                wl += 25.0;
            }
            na += 0.1;
        }
    }

    // NA = 1.0, λ = 550nm: the worked scenario from the lesson text
    #[test]
    fn green_light_unity_na_scenario() {
        assert!((rayleigh_criterion_um(550.0, 1.0) - 0.3355).abs() < 1e-10);
        assert!((abbe_criterion_um(550.0, 1.0) - 0.275).abs() < 1e-10);
        assert!((sparrow_criterion_um(550.0, 1.0) - 0.2585).abs() < 1e-10);
    }

    #[test]
    fn near_criterion_window() {
        let rayleigh = rayleigh_criterion_um(550.0, 1.0);
        assert!(near_criterion(rayleigh, rayleigh));
        assert!(near_criterion(rayleigh + 0.009, rayleigh));
        assert!(!near_criterion(rayleigh + 0.011, rayleigh));
        assert!(!near_criterion(rayleigh - 0.011, rayleigh));
    }

    #[test]
    fn nyquist_is_two_pixels_per_airy_radius() {
        let pixel = nyquist_pixel_size_um(550.0, 1.0);
        match sampling_rate(550.0, 1.0, pixel) {
            SamplingRate::PixelsPerAiryRadius(rate) => {
                assert!((rate - 2.0).abs() < 1e-12)
            }
            SamplingRate::Continuous => panic!("nonzero pixel cannot be continuous"),
        }
    }

    #[test]
    fn zero_pixel_reads_continuous() {
        assert_eq!(sampling_rate(550.0, 1.0, 0.0), SamplingRate::Continuous);
        assert_eq!(sampling_rate(550.0, 1.0, 0.0).to_string(), "continuous");
    }

    #[test]
    fn sampling_rate_formats_as_number() {
        let rate = sampling_rate(550.0, 1.0, 0.3355);
        assert_eq!(rate.to_string(), "1.00");
    }
}

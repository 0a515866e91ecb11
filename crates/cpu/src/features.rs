//! Processor feature flags and the tier precedence rules.

use std::sync::OnceLock;

use crate::Tier;

/// Raw feature flags relevant to tier selection.
///
/// The fields mirror individual CPUID bits (plus the OS-level XCR0 check).
/// They are public so callers and tests can build arbitrary combinations and
/// feed them to [`CpuFeatures::best_tier`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuFeatures {
    /// CPUID.1:EDX.SSE2.
    pub sse2: bool,
    /// CPUID.1:ECX.SSSE3.
    pub ssse3: bool,
    /// CPUID.1:ECX.SSE4_1.
    pub sse41: bool,
    /// CPUID.1:ECX.SSE4_2.
    pub sse42: bool,
    /// CPUID.1:ECX.FMA.
    pub fma: bool,
    /// CPUID.1:ECX.MOVBE.
    pub movbe: bool,
    /// CPUID.1:ECX.OSXSAVE, the OS has enabled `xgetbv`.
    pub osxsave: bool,
    /// XCR0 has both the SSE and AVX state bits set.
    pub avx_state_enabled: bool,
    /// CPUID.7.0:EBX.AVX2.
    pub avx2: bool,
    /// CPUID.7.0:EBX.BMI1.
    pub bmi1: bool,
    /// CPUID.7.0:EBX.BMI2.
    pub bmi2: bool,
    /// CPUID.80000001h:ECX.LZCNT.
    pub lzcnt: bool,
}

impl CpuFeatures {
    /// Highest tier whose requirements are all met.
    ///
    /// AVX2 is only chosen when every companion of the Haswell feature set is
    /// present and the OS saves the upper YMM state across context switches.
    pub const fn best_tier(&self) -> Tier {
        let haswell = self.fma && self.movbe && self.osxsave && self.avx_state_enabled;
        let bit_manipulation = self.avx2 && self.bmi1 && self.bmi2;

        if haswell && bit_manipulation && self.lzcnt {
            Tier::Avx2
        } else if self.sse41 && self.sse42 {
            Tier::Sse41
        } else if self.ssse3 {
            Tier::Ssse3
        } else if self.sse2 {
            Tier::Sse2
        } else {
            Tier::Ref
        }
    }

    /// Reads the flags of the running processor.
    ///
    /// Returns the empty set on architectures without SIMD kernels.
    pub fn probe() -> Self {
        probe_arch()
    }
}

#[cfg(target_arch = "x86_64")]
fn probe_arch() -> CpuFeatures {
    use raw_cpuid::CpuId;

    let cpuid = CpuId::new();
    let mut features = CpuFeatures::default();

    if let Some(info) = cpuid.get_feature_info() {
        features.sse2 = info.has_sse2();
        features.ssse3 = info.has_ssse3();
        features.sse41 = info.has_sse41();
        features.sse42 = info.has_sse42();
        features.fma = info.has_fma();
        features.movbe = info.has_movbe();
        features.osxsave = info.has_oxsave();
    }
    if let Some(extended) = cpuid.get_extended_feature_info() {
        features.avx2 = extended.has_avx2();
        features.bmi1 = extended.has_bmi1();
        features.bmi2 = extended.has_bmi2();
    }
    if let Some(ext_ids) = cpuid.get_extended_processor_and_feature_identifiers() {
        features.lzcnt = ext_ids.has_lzcnt();
    }
    if features.osxsave {
        features.avx_state_enabled = xcr0::avx_state_enabled();
    }

    features
}

#[cfg(not(target_arch = "x86_64"))]
fn probe_arch() -> CpuFeatures {
    CpuFeatures::default()
}

#[cfg(target_arch = "x86_64")]
mod xcr0 {
    #![allow(unsafe_code)]
    #![allow(unsafe_op_in_unsafe_fn)]

    use std::arch::x86_64::_xgetbv;

    const SSE_AND_AVX_STATE: u64 = 0b110;

    pub(super) fn avx_state_enabled() -> bool {
        // SAFETY: only reached when CPUID reports OSXSAVE, which guarantees
        // that XGETBV is enabled by the operating system.
        let xcr0 = unsafe { read_xcr0() };
        xcr0 & SSE_AND_AVX_STATE == SSE_AND_AVX_STATE
    }

    #[target_feature(enable = "xsave")]
    unsafe fn read_xcr0() -> u64 {
        _xgetbv(0)
    }
}

/// Best tier of the running processor, probed once and cached.
pub fn detect() -> Tier {
    static DETECTED: OnceLock<Tier> = OnceLock::new();
    *DETECTED.get_or_init(|| CpuFeatures::probe().best_tier())
}

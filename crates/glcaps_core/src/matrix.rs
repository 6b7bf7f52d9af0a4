//! Memoized capability answers for one context
//!
//! Every key kind has a pair of 64-bit words: the answers and the "already
//! derived" marks. A derived `false` is cached just like a `true`, so each
//! rule runs at most once per key for the life of the matrix.
//!
//! First resolution is expected on the thread that built the matrix; debug
//! builds assert it. Reads after that are safe from any thread.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::thread::{self, ThreadId};

use crate::extensions::{Extension, ExtensionSet};
use crate::format::{TextureFormat, TextureFormatCapabilities};
use crate::format_table::FormatCapabilityTable;
use crate::keys::{Capability, InternalCapability, InternalRequirement, Requirement, TextureCapability};
use crate::rules::Rules;
use crate::version::Version;

/// Data read from the driver once per context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probed {
    pub version: Version,
    pub extensions: ExtensionSet,
}

impl Probed {
    pub fn new(version: Version, extensions: ExtensionSet) -> Self {
        Self {
            version,
            extensions,
        }
    }
}

/// Write-once answer bits for one key kind.
#[derive(Debug, Default)]
struct BitCache {
    values: AtomicU64,
    resolved: AtomicU64,
}

impl BitCache {
    fn get(&self, index: usize) -> Option<bool> {
        let bit = 1u64 << index;
        if self.resolved.load(Ordering::Acquire) & bit == 0 {
            return None;
        }
        Some(self.values.load(Ordering::Relaxed) & bit != 0)
    }

    fn store(&self, index: usize, answer: bool) {
        let bit = 1u64 << index;
        if answer {
            self.values.fetch_or(bit, Ordering::Relaxed);
        }
        self.resolved.fetch_or(bit, Ordering::Release);
    }
}

/// Boolean and bitmask answers over the closed key sets.
#[derive(Debug)]
pub struct CapabilityMatrix {
    probed: Option<Probed>,
    extensions: BitCache,
    capabilities: BitCache,
    internal_capabilities: BitCache,
    texture_capabilities: BitCache,
    requirements: BitCache,
    internal_requirements: BitCache,
    formats: FormatCapabilityTable,
    evaluations: AtomicU32,
    owner: ThreadId,
}

const _: () = {
    assert!(Extension::COUNT <= 64);
    assert!(Capability::COUNT <= 64);
    assert!(InternalCapability::COUNT <= 64);
    assert!(TextureCapability::COUNT <= 64);
    assert!(Requirement::COUNT <= 64);
    assert!(InternalRequirement::COUNT <= 64);
};

impl CapabilityMatrix {
    /// Matrix over a successful probe.
    pub fn new(probed: Probed) -> Self {
        Self::with_probe(Some(probed))
    }

    /// Matrix for a context that could not be probed. Every answer is `false`
    /// and every format is unsupported.
    pub fn unavailable() -> Self {
        Self::with_probe(None)
    }

    fn with_probe(probed: Option<Probed>) -> Self {
        Self {
            probed,
            extensions: BitCache::default(),
            capabilities: BitCache::default(),
            internal_capabilities: BitCache::default(),
            texture_capabilities: BitCache::default(),
            requirements: BitCache::default(),
            internal_requirements: BitCache::default(),
            formats: FormatCapabilityTable::new(),
            evaluations: AtomicU32::new(0),
            owner: thread::current().id(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.probed.is_some()
    }

    pub fn probed(&self) -> Option<&Probed> {
        self.probed.as_ref()
    }

    pub fn version(&self) -> Option<Version> {
        self.probed.as_ref().map(|p| p.version)
    }

    /// Raw membership test against the probed extension set.
    pub fn is_supported(&self, name: &str) -> bool {
        self.probed
            .as_ref()
            .is_some_and(|p| p.extensions.contains(name))
    }

    /// Number of rule derivations run so far.
    pub fn evaluations(&self) -> u32 {
        self.evaluations.load(Ordering::Relaxed)
    }

    /// Make the calling thread the one allowed to resolve answers.
    pub fn adopt_current_thread(&mut self) {
        self.owner = thread::current().id();
    }

    pub fn has_extension(&self, key: Extension) -> bool {
        self.lookup(&self.extensions, key.index(), |rules| rules.extension_rule(key))
    }

    pub fn has_capability(&self, key: Capability) -> bool {
        self.lookup(&self.capabilities, key.index(), |rules| rules.capability_rule(key))
    }

    pub fn has_internal_capability(&self, key: InternalCapability) -> bool {
        self.lookup(&self.internal_capabilities, key.index(), |rules| {
            rules.internal_capability_rule(key)
        })
    }

    pub fn has_texture_capability(&self, key: TextureCapability) -> bool {
        self.lookup(&self.texture_capabilities, key.index(), |rules| {
            rules.texture_capability_rule(key)
        })
    }

    pub fn has_requirement(&self, key: Requirement) -> bool {
        self.lookup(&self.requirements, key.index(), |rules| rules.requirement_rule(key))
    }

    pub fn has_internal_requirement(&self, key: InternalRequirement) -> bool {
        self.lookup(&self.internal_requirements, key.index(), |rules| {
            rules.internal_requirement_rule(key)
        })
    }

    /// Capabilities of `format`, derived once and cached.
    pub fn texture_format_capabilities(&self, format: TextureFormat) -> TextureFormatCapabilities {
        if self.probed.is_none() {
            return TextureFormatCapabilities::empty();
        }
        self.formats.resolve(self, format)
    }

    /// Populate a format answer explicitly, for formats the table does not derive.
    pub fn insert_format_capabilities(&self, format: TextureFormat, caps: TextureFormatCapabilities) {
        self.formats.insert(format, caps);
    }

    // Seeding writes an answer as if it had been derived. Already resolved keys
    // keep their answer; the return value says whether the seed took.

    pub fn seed_extension(&self, key: Extension, answer: bool) -> bool {
        Self::seed(&self.extensions, key.index(), answer)
    }

    pub fn seed_capability(&self, key: Capability, answer: bool) -> bool {
        Self::seed(&self.capabilities, key.index(), answer)
    }

    pub fn seed_internal_capability(&self, key: InternalCapability, answer: bool) -> bool {
        Self::seed(&self.internal_capabilities, key.index(), answer)
    }

    pub fn seed_texture_capability(&self, key: TextureCapability, answer: bool) -> bool {
        Self::seed(&self.texture_capabilities, key.index(), answer)
    }

    pub fn seed_requirement(&self, key: Requirement, answer: bool) -> bool {
        Self::seed(&self.requirements, key.index(), answer)
    }

    pub fn seed_internal_requirement(&self, key: InternalRequirement, answer: bool) -> bool {
        Self::seed(&self.internal_requirements, key.index(), answer)
    }

    fn seed(cache: &BitCache, index: usize, answer: bool) -> bool {
        if cache.get(index).is_some() {
            return false;
        }
        cache.store(index, answer);
        true
    }

    fn lookup(&self, cache: &BitCache, index: usize, derive: impl FnOnce(&Rules<'_>) -> bool) -> bool {
        let Some(probed) = &self.probed else {
            return false;
        };
        if let Some(answer) = cache.get(index) {
            return answer;
        }

        debug_assert_eq!(
            thread::current().id(),
            self.owner,
            "capabilities must first be resolved on the thread that owns the context"
        );
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        let answer = derive(&Rules::new(self, probed));
        cache.store(index, answer);
        answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::*;

    fn matrix(version: Version, extensions: &[&str]) -> CapabilityMatrix {
        CapabilityMatrix::new(Probed::new(
            version,
            ExtensionSet::from_names(extensions.iter().copied()),
        ))
    }

    #[test]
    fn test_unavailable_answers_false() {
        let m = CapabilityMatrix::unavailable();
        assert!(!m.is_available());
        assert!(!m.has_capability(Capability::BindUniform));
        assert!(!m.has_capability(Capability::TextureFormatRgb));
        assert!(!m.has_internal_requirement(InternalRequirement::MapBufferExtReq));
        assert!(m
            .texture_format_capabilities(TextureFormat::Rgba8Unorm)
            .is_empty());
        assert_eq!(m.evaluations(), 0);
    }

    #[test]
    fn test_repeated_queries_derive_once() {
        let m = matrix(GL_4_6, &["GL_KHR_debug"]);
        for key in Capability::ALL {
            m.has_capability(*key);
        }
        let after_first = m.evaluations();
        assert!(after_first > 0);

        for key in Capability::ALL {
            let first = m.has_capability(*key);
            assert_eq!(first, m.has_capability(*key));
        }
        assert_eq!(m.evaluations(), after_first);
    }

    #[test]
    fn test_false_answers_are_cached() {
        let m = matrix(ES_2_0, &[]);
        assert!(!m.has_capability(Capability::Compute));
        let evaluations = m.evaluations();
        assert!(!m.has_capability(Capability::Compute));
        assert_eq!(m.evaluations(), evaluations);
    }

    #[test]
    fn test_family_gated_extension() {
        let desktop = matrix(GL_3_3, &["GL_OES_vertex_array_object"]);
        assert!(!desktop.has_extension(Extension::VertexArrayObject));

        let embedded = matrix(ES_2_0, &["GL_OES_vertex_array_object"]);
        assert!(embedded.has_extension(Extension::VertexArrayObject));
        assert!(embedded.is_supported("GL_OES_vertex_array_object"));
    }

    #[test]
    fn test_seed_before_use() {
        let m = matrix(ES_3_0, &[]);
        assert!(m.seed_internal_capability(InternalCapability::ProgramInterfaceQuery, true));
        assert!(m.has_internal_capability(InternalCapability::ProgramInterfaceQuery));
        // resolved keys keep their answer
        assert!(!m.seed_internal_capability(InternalCapability::ProgramInterfaceQuery, false));
        assert!(m.has_internal_capability(InternalCapability::ProgramInterfaceQuery));
    }

    #[test]
    fn test_version_or_extension_product() {
        // UniformBlocks: desktop 3.1, or GL_ARB_uniform_buffer_object
        let cases = [
            (GL_3_0, false, false),
            (GL_3_0, true, true),
            (GL_3_1, false, true),
            (GL_3_1, true, true),
        ];
        for (version, present, expected) in cases {
            let names: &[&str] = if present { &["GL_ARB_uniform_buffer_object"] } else { &[] };
            let m = matrix(version, names);
            assert_eq!(m.has_capability(Capability::UniformBlocks), expected, "{version} {present}");
        }
    }

    #[test]
    fn test_requirements() {
        let es2 = matrix(ES_2_0, &[]);
        assert!(es2.has_requirement(Requirement::StandardDerivativeExtReq));
        assert!(es2.has_requirement(Requirement::ShaderTextureLodExtReq));
        assert!(!es2.has_requirement(Requirement::ExplicitBindingExtReq));

        let gl41 = matrix(GL_4_1, &[]);
        assert!(gl41.has_requirement(Requirement::ExplicitBindingExtReq));
        assert!(!gl41.has_requirement(Requirement::TextureArrayExtReq));
    }

    #[test]
    fn test_internal_requirements() {
        let es2 = matrix(ES_2_0, &["GL_OES_depth_texture"]);
        assert!(es2.has_internal_requirement(InternalRequirement::VertexArrayObjectExtReq));
        assert!(es2.has_internal_requirement(InternalRequirement::MultiSampleExtReq));
        assert!(es2.has_internal_requirement(InternalRequirement::Depth32Unsized));
        assert!(es2.has_internal_requirement(InternalRequirement::DebugLabelExtEnumsReq));

        let es3 = matrix(ES_3_0, &[]);
        assert!(!es3.has_internal_requirement(InternalRequirement::VertexArrayObjectExtReq));
        assert!(!es3.has_internal_requirement(InternalRequirement::MultiSampleExtReq));
        assert!(es3.has_internal_requirement(InternalRequirement::MapBufferExtReq));

        let gl = matrix(GL_3_3, &["GL_KHR_debug"]);
        assert!(gl.has_internal_requirement(InternalRequirement::DebugLabelExtReq));
        assert!(!gl.has_internal_requirement(InternalRequirement::DebugLabelExtEnumsReq));
    }

    #[test]
    fn test_reads_from_other_threads_after_resolution() {
        let m = std::sync::Arc::new(matrix(GL_4_6, &[]));
        let expected = m.has_capability(Capability::Compute);
        assert!(expected);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let m = m.clone();
                std::thread::spawn(move || m.has_capability(Capability::Compute))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;

use flate2::write::GzEncoder;
use starfetch::{FetchError, Transport};

/// In-memory mirrors keyed by URI. Unknown URIs fail like an unreachable host.
#[derive(Default)]
pub struct FakeMirrors {
    bodies: HashMap<String, Vec<u8>>,
    requested: RefCell<Vec<String>>,
}

impl FakeMirrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, uri: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(uri.to_string(), body.into());
        self
    }

    /// URIs requested so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl Transport for FakeMirrors {
    fn get(&self, uri: &str) -> Result<Vec<u8>, FetchError> {
        self.requested.borrow_mut().push(uri.to_string());
        self.bodies
            .get(uri)
            .cloned()
            .ok_or_else(|| FetchError::Transport(format!("could not resolve {uri}")))
    }
}

impl Transport for &FakeMirrors {
    fn get(&self, uri: &str) -> Result<Vec<u8>, FetchError> {
        (**self).get(uri)
    }
}

pub fn gzip(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

/// A slice of the HYG v3 layout with a mix of bright, faint and broken rows.
pub const HYG_SAMPLE: &str = "\
id,hip,hd,hr,gl,bf,proper,ra,dec,dist,mag,absmag,spect
0,,,,,,Sol,0.000000,0.000000,0.0000,-26.700,4.850,G2V
32263,32349,48915,2491,Gl 244A,9Alp CMa,Sirius,6.752481,-16.716116,2.6371,-1.440,1.454,A0m...
30365,30438,45348,2326,,Alp Car,Canopus,6.399194,-52.695661,95.8773,-0.620,-5.528,F0Ib
69451,69673,124897,5340,Gl 541,16Alp Boo,Arcturus,14.261028,19.182450,11.2575,-0.050,-0.307,K1.5IIIFe-0.5
91262,91262,172167,7001,Gl 721,3Alp Lyr,Vega,18.615649,38.783692,7.6787,0.030,0.604,A0Vvar
27919,27989,39801,2061,,58Alp Ori,Betelgeuse,5.919529,7.407063,152.6718,0.450,-5.469,M2Ib
1000,1001,1002,,,,,0.200000,10.000000,100.0,7.800,1.000,K0
1001,1002,1003,,,,,not-a-number,10.000000,100.0,3.100,1.000,K0
70667,70890,,,Gl 551,,Proxima Centauri,14.495985,-62.679485,1.2959,11.010,15.447,M5Ve
54061,54061,95689,4301,,50Alp UMa,Dubhe,11.062155,61.751033,37.6790,1.810,-1.108,K0IIIa
8170,8198,,,,,,1.756000,-10.000000,100.0,4.990,1.000,K0
";

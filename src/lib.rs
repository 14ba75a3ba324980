pub mod configuration;

pub mod intersection {
    pub mod intersectionerror;
    pub mod sampledcurve;
    pub mod curveinterpolator;
    pub mod gridplanner;
    pub mod signchange;
    pub mod cellrefiner;
    pub mod resultassembler;
    pub mod intersectionlocator;
}

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod nonparametriccurve {
            pub mod nonparametriccurve;
            pub mod piecewisepolynomial;
        }
    }
}

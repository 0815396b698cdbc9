/// Asserts that the expression is `Some` and evaluates to the value.
#[macro_export]
macro_rules! assert_some {
    ($e:expr) => {
        match $e {
            Some(v) => v,
            None => panic!("expected `Some`; actual=None"),
        }
    };
}

#[macro_export]
macro_rules! assert_none {
    ($e:expr) => {
        match $e {
            None => {}
            actual => panic!("expected `None`; actual={:?}", actual),
        }
    };
}

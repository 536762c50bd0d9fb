/// Invoke a macro once per tuple arity, peeling one type off the front each time.
#[macro_export]
macro_rules! for_every_tuple {
    ($m:ident !! $head_ty:ident) => {
        $m!($head_ty);
    };
    ($m:ident !! $head_ty:ident, $($tail_ty:ident),*) => (
        $m!($head_ty, $( $tail_ty ),*);
        $crate::for_every_tuple!($m !! $( $tail_ty ),*);
    );
}

/// Apply a macro to every tuple arity from 1 to 16.
///
/// Sixteen keeps the generated impls small while covering any requirement a system would
/// reasonably spell out in one tuple.
#[macro_export]
macro_rules! all_tuples {
    ($m:ident) => {
        $crate::for_every_tuple!($m !! A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P);
    };
}

#[cfg(test)]
mod tests {
    trait Arity {
        const ARITY: usize;
    }

    macro_rules! count_arity {
        ($($name: ident),*) => {
            impl<$($name),*> Arity for ($($name,)*) {
                const ARITY: usize = [$(stringify!($name)),*].len();
            }
        }
    }

    all_tuples!(count_arity);

    #[test]
    fn covers_every_arity() {
        assert_eq!(<(u8,) as Arity>::ARITY, 1);
        assert_eq!(<(u8, u16, u32) as Arity>::ARITY, 3);
        assert_eq!(
            <(u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8) as Arity>::ARITY,
            16
        );
    }
}

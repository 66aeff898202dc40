// SPDX-License-Identifier: Apache-2.0

use crate::multgen::MultGen;
use crate::multgen::sampler::RandomSource;

impl<R: RandomSource + ?Sized> MultGen<'_, R> {
    /// Places every partial product `a[i] & b[j]` into column `i + j`.
    ///
    /// Lower columns are filled first, each in increasing `a` index; no
    /// randomness is involved.
    pub fn layout_partial_products(&mut self) {
        let n = self.width;
        for s in 0..n {
            for i in 0..=s {
                self.push_partial_product(s, i, s - i);
            }
        }
        for s in 0..n {
            for i in (s + 1)..n {
                self.push_partial_product(n + s, i, n + s - i);
            }
        }
        // With a single bit per operand the top column would never receive
        // anything; it is constant zero.
        if n == 1 {
            let zero = self.gb.get_false();
            self.columns.push(1, zero);
        }
    }

    fn push_partial_product(&mut self, column: usize, i: usize, j: usize) {
        let product = self
            .gb
            .add_and_binary(*self.a.get_lsb(i), *self.b.get_lsb(j));
        self.columns.push(column, product);
    }
}
